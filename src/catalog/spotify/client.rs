//! Spotify search HTTP client
//!
//! Handles communication with the Spotify Web API search endpoint.
//! See: https://developer.spotify.com/documentation/web-api/reference/search
//!
//! Each search fetches a fresh bearer token from the configured
//! [`TokenProvider`] before issuing the request.

use std::time::Duration;

use super::dto;
use crate::catalog::domain::CatalogError;
use crate::catalog::traits::TokenProvider;

/// The provider caps search page sizes at 50 items
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// User agent sent on outbound requests
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fixed deadline for one search request; expiry reports as Unavailable
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Spotify search API client
pub struct SpotifyClient {
    token_provider: Box<dyn TokenProvider>,
    http_client: reqwest::Client,
    base_url: String,
}

impl SpotifyClient {
    /// Create a new client.
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses (reduces bandwidth)
    /// - Send a User-Agent header identifying the application
    /// - Give up after a 10 second deadline
    pub fn new(token_provider: Box<dyn TokenProvider>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            token_provider,
            http_client,
            base_url: "https://api.spotify.com".to_string(),
        }
    }

    /// Create a client for testing with a custom base URL
    #[cfg(test)]
    pub fn with_base_url(token_provider: Box<dyn TokenProvider>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(token_provider);
        client.base_url = base_url.into();
        client
    }

    /// Run one track search and return the raw result items.
    ///
    /// `limit` is clamped silently into `1..=50`; callers only ever want
    /// "up to N" items, so an out-of-range request is not an error.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<dto::RawTrack>, CatalogError> {
        let token = self.token_provider.get_token().await?;
        let response = self
            .send_search_request(&token, query, clamp_limit(limit), market)
            .await?;

        // An absent tracks page is a contract break, never an empty result.
        let page = response
            .tracks
            .ok_or_else(|| CatalogError::Parse("response missing `tracks` page".to_string()))?;

        Ok(page.items)
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        token: &str,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<dto::SearchResponse, CatalogError> {
        let url = format!("{}/v1/search", self.base_url);

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track")])
            .query(&[("limit", limit)]);

        if let Some(market) = market {
            request = request.query(&[("market", market)]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Unavailable("request deadline exceeded".to_string())
            } else {
                CatalogError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::TokenRejected);
        }

        if !status.is_success() {
            return Err(CatalogError::Unavailable(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

/// Clamp a requested limit into the range the provider accepts.
fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_SEARCH_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::traits::mocks::MockTokenProvider;

    #[test]
    fn test_client_creation() {
        let client = SpotifyClient::new(Box::new(MockTokenProvider::fixed("t")));
        assert_eq!(client.base_url, "https://api.spotify.com");
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = SpotifyClient::with_base_url(
            Box::new(MockTokenProvider::fixed("t")),
            "http://localhost:8080",
        );
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(40), 40);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(500), 50);
    }

    /// A failed token exchange surfaces before any search request is made
    #[tokio::test]
    async fn test_token_failure_short_circuits_search() {
        let client = SpotifyClient::with_base_url(
            Box::new(MockTokenProvider::failing()),
            "http://127.0.0.1:9",
        );

        let err = client.search("year:1995", 40, Some("US")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Auth(_)));
    }
}
