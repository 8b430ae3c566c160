//! Configuration management for the client.

use std::env;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the remote record collection
    pub api_url: String,
    /// Transport timeout for each remote call
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("ROSTER_API_URL")
            .or_else(|| lookup("REACT_APP_API_URL"))
            .ok_or(ConfigError::MissingApiUrl)?;

        let http_timeout = lookup("ROSTER_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidTimeout)?;

        Ok(Self {
            api_url,
            http_timeout,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ROSTER_API_URL environment variable is required")]
    MissingApiUrl,

    #[error("Invalid ROSTER_HTTP_TIMEOUT_SECS value")]
    InvalidTimeout,
}
