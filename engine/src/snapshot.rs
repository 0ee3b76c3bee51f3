//! Snapshot types for persisting and restoring cached countries.
//!
//! Snapshots are the bridge between an in-memory store and a file on disk.
//! They serialize deterministically so two snapshots of the same contents
//! compare and diff cleanly.

use crate::{error::Result, Country, CountryId, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Newest snapshot layout this build reads and writes.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time copy of every cached country, ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySnapshot {
    pub format_version: u32,
    /// Countries keyed by id
    pub countries: BTreeMap<CountryId, Country>,
}

impl Default for CountrySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl CountrySnapshot {
    pub fn new() -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            countries: BTreeMap::new(),
        }
    }

    /// Add a country, replacing any country with the same id.
    pub fn add_country(&mut self, country: Country) {
        self.countries.insert(country.id, country);
    }

    pub fn get_country(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Consume the snapshot, yielding countries in id order.
    pub fn into_countries(self) -> Vec<Country> {
        self.countries.into_values().collect()
    }

    /// Check that every entry is filed under its own id.
    pub fn validate(&self) -> Result<()> {
        for (key, country) in &self.countries {
            if *key != country.id {
                return Err(Error::InvalidSnapshot(format!(
                    "country '{}' filed under id {} but has id {}",
                    country.name, key, country.id
                )));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a snapshot.
    ///
    /// Snapshots written by a newer format, or with countries filed under a
    /// foreign id, are rejected with [`Error::InvalidSnapshot`].
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot = serde_json::from_str::<Self>(json)
            .map_err(|e| Error::InvalidSnapshot(format!("unreadable snapshot: {}", e)))?;

        match snapshot.format_version {
            version if version > SNAPSHOT_FORMAT_VERSION => Err(Error::InvalidSnapshot(format!(
                "snapshot format {} is newer than {}",
                version, SNAPSHOT_FORMAT_VERSION
            ))),
            _ => snapshot.validate().map(|()| snapshot),
        }
    }
}

impl FromIterator<Country> for CountrySnapshot {
    fn from_iter<I: IntoIterator<Item = Country>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for country in iter {
            snapshot.add_country(country);
        }
        snapshot
    }
}
