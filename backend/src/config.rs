//! Configuration management for the Weather Sync Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WXSYNC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Synchronization configuration
    pub sync: SyncConfig,

    /// Current-conditions provider configuration
    pub provider: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncConfig {
    /// Path to the JSON document holding the LOCATIONS array
    pub locations_file: String,

    /// Seconds between pipeline runs
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Current-conditions API endpoint
    pub endpoint: String,

    /// Provider API key. Required; startup fails without it.
    pub api_key: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("WXSYNC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "sqlite://weather.sqlite?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("sync.locations_file", "config/locations.json")?
            .set_default("sync.interval_secs", 900)?
            .set_default(
                "provider.endpoint",
                "https://weather.googleapis.com/v1/currentConditions:lookup",
            )?
            .set_default("provider.api_key", "")?
            .set_default("provider.timeout_secs", 15)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WXSYNC_ prefix)
            .add_source(
                Environment::with_prefix("WXSYNC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject configurations that cannot start: the provider credential is
    /// required before the first fetch run is scheduled.
    pub fn validate(&self) -> AppResult<()> {
        if self.provider.api_key.trim().is_empty() {
            return Err(AppError::MissingCredential(
                "provider.api_key (WXSYNC_PROVIDER__API_KEY) is not set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(api_key: &str) -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            sync: SyncConfig {
                locations_file: "config/locations.json".to_string(),
                interval_secs: 900,
            },
            provider: ProviderConfig {
                endpoint: "http://localhost/conditions".to_string(),
                api_key: api_key.to_string(),
                timeout_secs: 15,
            },
        }
    }

    #[test]
    fn missing_credential_is_startup_fatal() {
        let err = base_config("").validate().unwrap_err();
        assert!(matches!(err, AppError::MissingCredential(_)));

        // Whitespace does not count as a credential either.
        assert!(base_config("   ").validate().is_err());
    }

    #[test]
    fn present_credential_passes_validation() {
        assert!(base_config("k3y").validate().is_ok());
    }
}
