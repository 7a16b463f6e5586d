//! Catalog search module - finds songs on the external music catalog.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`spotify/dto.rs`) - Exact API response shapes
//! - **Adapter** (`spotify/adapter.rs`) - Converts DTOs to domain models
//! - **Clients** (`spotify/client.rs`, `spotify/token.rs`) - HTTP clients for the provider
//! - **Service** (`service.rs`) - The four search operations
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. The aggregator is tested against a fake catalog, without network access
//!
//! # Usage
//!
//! ```ignore
//! use nostalgia::catalog::{ClientCredentials, SearchService, SpotifyClient, SpotifyTokenProvider};
//!
//! let credentials = ClientCredentials::new(client_id, client_secret);
//! let client = SpotifyClient::new(Box::new(SpotifyTokenProvider::new(credentials)));
//! let service = SearchService::new(client);
//!
//! let tracks = service.search_by_year(1995, 40).await?;
//! println!("{} - {}", tracks[0].artist, tracks[0].title);
//! ```

pub mod domain;
pub mod service;
pub mod spotify;
pub mod traits;

pub use domain::{CatalogError, SearchQuery, Track};
pub use service::{SearchService, DEFAULT_TEXT_LIMIT, DEFAULT_YEAR_LIMIT};
pub use spotify::{ClientCredentials, SpotifyClient, SpotifyTokenProvider};
pub use traits::{CatalogApi, TokenProvider};
