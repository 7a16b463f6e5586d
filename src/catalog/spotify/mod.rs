//! Spotify integration: token exchange, search client, and the adapter
//! that converts API responses into domain tracks.

pub mod adapter;
pub mod client;
pub mod dto;
pub mod token;

pub use client::{SpotifyClient, MAX_SEARCH_LIMIT};
pub use token::{ClientCredentials, SpotifyTokenProvider};
