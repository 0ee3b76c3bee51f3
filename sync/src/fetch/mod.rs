//! Remote country sources.

mod http;

pub use http::{FileFetcher, HttpFetcher};

use async_trait::async_trait;
use atlas_engine::Country;

/// Why a fetch produced no countries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The source could not be reached or answered with a failure status.
    #[error("{0}")]
    Transport(String),

    /// The source answered but the body was not a country list.
    #[error("{0}")]
    Decode(String),
}

impl From<atlas_engine::Error> for FetchError {
    fn from(err: atlas_engine::Error) -> Self {
        match err {
            atlas_engine::Error::Decode(msg) => FetchError::Decode(msg),
            other => FetchError::Decode(other.to_string()),
        }
    }
}

/// Retrieves the complete country list from a remote source.
///
/// Implementations decode every element; a single malformed element fails
/// the whole call.
#[async_trait]
pub trait CountryFetcher: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Country>, FetchError>;
}
