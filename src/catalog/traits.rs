//! Trait definitions for the external catalog boundary.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real Spotify implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use nostalgia::catalog::traits::CatalogApi;
//!
//! // In production code:
//! async fn run<C: CatalogApi>(catalog: &C) {
//!     let items = catalog.search("year:1995", 40, Some("US")).await?;
//! }
//!
//! // In tests:
//! struct MockCatalog { ... }
//! impl CatalogApi for MockCatalog { ... }
//! ```

use async_trait::async_trait;

use super::domain::CatalogError;
use super::spotify::dto::RawTrack;

/// Trait for the bearer-token exchange.
///
/// Must return a currently-valid token; the caller never caches or refreshes
/// it. Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Exchange stored client credentials for a bearer token.
    async fn get_token(&self) -> Result<String, CatalogError>;
}

/// Trait for the one catalog capability: search for tracks.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Run one bounded track search and return the raw result items.
    async fn search(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<RawTrack>, CatalogError>;
}

// A boxed catalog is itself a catalog, so services can hold `Box<dyn CatalogApi>`

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Box<T> {
    async fn search(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<RawTrack>, CatalogError> {
        (**self).search(query, limit, market).await
    }
}

// Implement traits for real clients

#[async_trait]
impl TokenProvider for super::spotify::SpotifyTokenProvider {
    async fn get_token(&self) -> Result<String, CatalogError> {
        self.get_token().await
    }
}

#[async_trait]
impl CatalogApi for super::spotify::SpotifyClient {
    async fn search(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<RawTrack>, CatalogError> {
        self.search(query, limit, market).await
    }
}
