//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\nostalgia\config.toml
//! - macOS: ~/Library/Application Support/nostalgia/config.toml
//! - Linux: ~/.config/nostalgia/config.toml
//!
//! The config file is human-readable and editable. Catalog credentials can
//! also come from the `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`
//! environment variables, which take precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::ClientCredentials;

/// Environment variable holding the catalog client ID
pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
/// Environment variable holding the catalog client secret
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Catalog search settings
    pub search: SearchConfig,
}

/// Catalog API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Spotify application client ID
    pub client_id: Option<String>,

    /// Spotify application client secret
    pub client_secret: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server listens on
    pub bind: String,

    /// Database file path (default: nostalgia.db in the working directory)
    pub db_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            db_path: None,
        }
    }
}

/// Catalog search settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Market code applied to exact-year searches (default "US")
    pub market: Option<String>,
}

impl Config {
    /// Resolve catalog credentials, environment first, then the config file.
    ///
    /// Missing values resolve to empty strings; the token provider reports
    /// those as an authorization error when a search is attempted.
    pub fn resolve_credentials(&self) -> ClientCredentials {
        self.resolve_credentials_from(|name| std::env::var(name).ok())
    }

    fn resolve_credentials_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ClientCredentials {
        let client_id = lookup(ENV_CLIENT_ID)
            .or_else(|| self.credentials.client_id.clone())
            .unwrap_or_default();
        let client_secret = lookup(ENV_CLIENT_SECRET)
            .or_else(|| self.credentials.client_secret.clone())
            .unwrap_or_default();
        ClientCredentials::new(client_id, client_secret)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("nostalgia"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[search]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.client_id = Some("app-id".to_string());
        config.credentials.client_secret = Some("app-secret".to_string());
        config.server.bind = "0.0.0.0:8080".to_string();
        config.search.market = Some("SE".to_string());

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.credentials.client_id, Some("app-id".to_string()));
        assert_eq!(parsed.server.bind, "0.0.0.0:8080");
        assert_eq!(parsed.search.market, Some("SE".to_string()));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[credentials]
client_id = "my-id"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.credentials.client_id, Some("my-id".to_string()));

        // Other fields use defaults
        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert!(config.search.market.is_none());
    }

    #[test]
    fn test_env_overrides_file_credentials() {
        let mut config = Config::default();
        config.credentials.client_id = Some("file-id".to_string());
        config.credentials.client_secret = Some("file-secret".to_string());

        let resolved = config.resolve_credentials_from(|name| match name {
            ENV_CLIENT_ID => Some("env-id".to_string()),
            _ => None,
        });

        assert_eq!(resolved.client_id, "env-id");
        assert_eq!(resolved.client_secret, "file-secret");
    }

    #[test]
    fn test_missing_credentials_resolve_empty() {
        let resolved = Config::default().resolve_credentials_from(|_| None);
        assert!(!resolved.is_configured());
    }
}
