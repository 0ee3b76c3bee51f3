//! Unified error handling for the synchronizer.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::config::ConfigError;
use crate::fetch::FetchError;
use atlas_engine::Report;

/// Synchronizer error type.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Engine(#[from] atlas_engine::Error),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SyncError {
    /// The dismissible notice shown for this error.
    ///
    /// Failures of the remote source are framed as network data errors;
    /// everything else is a generic error.
    pub fn to_report(&self) -> Report {
        match self {
            SyncError::Fetch(e) => Report::network(e.to_string()),
            SyncError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                Report::error(self.to_string())
            }
            SyncError::Migration(_)
            | SyncError::Engine(_)
            | SyncError::Config(_)
            | SyncError::InvalidRecord(_)
            | SyncError::Internal(_) => Report::error(self.to_string()),
        }
    }
}

/// Result type alias for synchronizer operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Await `future`, turning a panic inside it into [`SyncError::Internal`].
pub(crate) async fn guarded<T, F>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!("Operation panicked: {}", message);
            Err(SyncError::Internal(message))
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        String::new()
    }
}
