//! Record Store - the local country cache.
//!
//! A [`CountryStore`] persists countries keyed by [`CountryId`]. Writes are
//! upserts: storing a country whose id already exists replaces it in place.
//!
//! Two implementations ship with the crate:
//! - [`MemoryStore`], a concurrent map with JSON snapshot export/import
//! - [`SqliteStore`], a SQLite-backed cache that survives restarts

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use atlas_engine::{Country, CountryId};
use serde::{Deserialize, Serialize};

use crate::error::{guarded, Result};

/// A single record that could not be written during a bulk upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedWrite {
    pub id: CountryId,
    pub name: String,
    pub reason: String,
}

/// Outcome of [`CountryStore::upsert_many`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSummary {
    pub succeeded: usize,
    pub failed: Vec<FailedWrite>,
}

impl UpsertSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

/// Keyed storage of countries.
#[async_trait]
pub trait CountryStore: Send + Sync {
    /// Get a country by id.
    async fn get(&self, id: CountryId) -> Result<Option<Country>>;

    /// Delete a country. Deleting an absent id is not an error.
    async fn remove(&self, id: CountryId) -> Result<()>;

    /// Every stored country, in no particular order.
    async fn select_all(&self) -> Result<Vec<Country>>;

    /// Insert or replace a country.
    async fn upsert(&self, country: &Country) -> Result<()>;

    /// Upsert every country, continuing past failures.
    ///
    /// Each failure, including a panic inside `upsert`, is logged and
    /// collected in the summary; a failure never prevents the remaining
    /// countries from being written.
    async fn upsert_many(&self, countries: &[Country]) -> UpsertSummary {
        let mut summary = UpsertSummary::default();

        for country in countries {
            match guarded(self.upsert(country)).await {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    tracing::warn!(
                        id = country.id,
                        name = %country.name,
                        "Failed to store country: {}",
                        e
                    );
                    summary.failed.push(FailedWrite {
                        id: country.id,
                        name: country.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        summary
    }

    /// Countries whose name contains `substring` (case-sensitive).
    async fn search_by_name(&self, substring: &str) -> Result<Vec<Country>>;

    /// Countries listing exactly `continent` among their continents.
    async fn search_by_continent(&self, continent: &str) -> Result<Vec<Country>>;

    /// Countries listing exactly `language` among their languages.
    async fn search_by_language(&self, language: &str) -> Result<Vec<Country>>;

    async fn count(&self) -> Result<usize> {
        Ok(self.select_all().await?.len())
    }

    /// Remove every country.
    async fn clear(&self) -> Result<()>;
}
