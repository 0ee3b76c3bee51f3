//! Error types for the Atlas engine.

use crate::CountryId;
use thiserror::Error;

/// All possible errors from the Atlas engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Payload errors
    #[error("malformed country payload: {0}")]
    Decode(String),

    // Lookup errors
    #[error("That country does not exist in the cache.")]
    CountryNotFound(CountryId),

    #[error("There aren't countries into cache.")]
    EmptyCache,

    // State errors
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
