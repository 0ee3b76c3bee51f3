//! Configuration management for the synchronizer.

use std::env;
use std::time::Duration;

/// Endpoint listing every country.
pub const DEFAULT_API_URL: &str = "https://restcountries.com/v3.1/all";
/// SQLite file used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://atlas.db?mode=rwc";

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL returning the full country list
    pub api_url: String,
    /// SQLite connection URL for the country cache
    pub database_url: String,
    /// Upper bound on a single fetch; `None` waits indefinitely
    pub fetch_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            fetch_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("ATLAS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if api_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let fetch_timeout = match lookup("ATLAS_FETCH_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_url,
            database_url,
            fetch_timeout,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ATLAS_API_URL must not be empty")]
    EmptyApiUrl,

    #[error("Invalid ATLAS_FETCH_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}
