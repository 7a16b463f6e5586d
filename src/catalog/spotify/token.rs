//! Bearer-token exchange against the Spotify accounts service.
//!
//! Implements the client-credentials grant: POST /api/token with Basic auth
//! of `client_id:client_secret` and body `grant_type=client_credentials`.
//! See: https://developer.spotify.com/documentation/web-api/tutorials/client-credentials-flow
//!
//! Tokens are NOT cached here - a fresh token is fetched for every search
//! call.

use std::time::Duration;

use super::dto;
use crate::catalog::domain::CatalogError;

/// User agent sent on outbound requests
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fixed deadline for the token exchange
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stored client credentials for the catalog provider.
#[derive(Debug, Clone, Default)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both halves present and non-empty.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// Token provider performing the client-credentials exchange.
pub struct SpotifyTokenProvider {
    credentials: ClientCredentials,
    http_client: reqwest::Client,
    token_url: String,
}

impl SpotifyTokenProvider {
    /// Create a provider for the given credentials.
    pub fn new(credentials: ClientCredentials) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            credentials,
            http_client,
            token_url: "https://accounts.spotify.com/api/token".to_string(),
        }
    }

    /// Create a provider for testing with a custom token endpoint
    #[cfg(test)]
    pub fn with_token_url(credentials: ClientCredentials, token_url: impl Into<String>) -> Self {
        let mut provider = Self::new(credentials);
        provider.token_url = token_url.into();
        provider
    }

    /// Exchange the stored credentials for a bearer token.
    ///
    /// Fails with [`CatalogError::Auth`] when the credentials are missing,
    /// the exchange does not return HTTP 200, or the transport fails.
    pub async fn get_token(&self) -> Result<String, CatalogError> {
        if !self.credentials.is_configured() {
            return Err(CatalogError::Auth(
                "client credentials not configured".to_string(),
            ));
        }

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Auth(format!("token exchange failed: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(CatalogError::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let token = response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| CatalogError::Auth(format!("malformed token response: {e}")))?;

        Ok(token.access_token)
    }
}
