use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use atlas_engine::{decode_countries, Country};

use super::{CountryFetcher, FetchError};
use crate::config::Config;

/// Fetches the country list over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.api_url.clone(), config.fetch_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CountryFetcher for HttpFetcher {
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        tracing::debug!("Fetching countries from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "{} answered with status {}",
                self.url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let countries = decode_countries(&body)?;
        tracing::debug!("Fetched {} countries", countries.len());
        Ok(countries)
    }
}

/// Reads the country list from a JSON file on disk.
///
/// Used for offline runs against a previously saved payload.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CountryFetcher for FileFetcher {
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {}", self.path.display(), e)))?;
        decode_countries(&body).map_err(FetchError::from)
    }
}
