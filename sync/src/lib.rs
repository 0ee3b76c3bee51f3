//! # Atlas Sync
//!
//! The IO half of Atlas: a local country cache, the remote source it is
//! refreshed from, and the [`Synchronizer`] that reconciles the two.
//!
//! All pure logic (decoding, filtering, language aggregation, phase types)
//! lives in `atlas_engine`; this crate only moves data between the network,
//! the store and the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use atlas_sync::{Config, HttpFetcher, SqliteStore, Synchronizer};
//! use futures::StreamExt;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let store = SqliteStore::connect(&config.database_url).await?;
//! let fetcher = HttpFetcher::from_config(&config)?;
//!
//! let sync = Synchronizer::new(Arc::new(store), Arc::new(fetcher));
//! let mut phases = Box::pin(sync.synchronize());
//! while let Some(phase) = phases.next().await {
//!     println!("{:?}", phase);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod store;
pub mod sync;

pub use config::{Config, ConfigError};
pub use error::{Result, SyncError};
pub use fetch::{CountryFetcher, FetchError, FileFetcher, HttpFetcher};
pub use store::{CountryStore, FailedWrite, MemoryStore, SqliteStore, UpsertSummary};
pub use sync::{apply_filters, distinct_languages, CountriesPhase, Synchronizer};
