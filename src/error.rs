//! Application-wide error types.
//!
//! This module provides a unified error hierarchy for the application.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`CatalogError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility

use crate::catalog::CatalogError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling. The web
/// layer maps failures onto HTTP responses itself; this enum is the CLI and
/// server-startup surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Catalog search error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A caller-supplied argument was rejected
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }
}
