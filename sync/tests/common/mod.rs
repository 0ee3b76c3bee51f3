//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use atlas_engine::{Country, CountryId, Phase};
use atlas_sync::{CountryFetcher, CountryStore, FetchError, MemoryStore, Result, SyncError};
use futures::{Stream, StreamExt};
use serde_json::json;

pub const CONTINENTS: [&str; 3] = ["Europe", "Asia", "South America"];

/// A payload element in the remote source's shape.
pub fn payload_item(
    official: &str,
    continent: &str,
    languages: &[(&str, &str)],
) -> serde_json::Value {
    let languages: serde_json::Map<String, serde_json::Value> = languages
        .iter()
        .map(|(code, name)| (code.to_string(), json!(name)))
        .collect();

    json!({
        "name": {"common": official, "official": official},
        "continents": [continent],
        "languages": languages,
        "flags": {"png": format!("https://flags.test/{}.png", official.len())},
        "coatOfArms": {},
        "area": 1000.0,
        "population": 5000,
        "unMember": true,
        "status": "officially-assigned",
        "capital": ["Somewhere"]
    })
}

pub fn payload(n: usize) -> String {
    let items: Vec<_> = (0..n)
        .map(|i| {
            payload_item(
                &format!("Republic of Place {}", i),
                CONTINENTS[i % CONTINENTS.len()],
                &[("eng", "English")],
            )
        })
        .collect();
    serde_json::to_string(&items).unwrap()
}

pub fn countries(n: usize) -> Vec<Country> {
    atlas_engine::decode_countries_str(&payload(n)).unwrap()
}

pub async fn collect<T>(stream: impl Stream<Item = Phase<T>>) -> Vec<Phase<T>> {
    stream.collect().await
}

/// Fetcher returning a fixed result and counting its calls.
pub struct FixedFetcher {
    result: std::result::Result<Vec<Country>, FetchError>,
    calls: AtomicUsize,
}

impl FixedFetcher {
    pub fn countries(countries: Vec<Country>) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(countries),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(err: FetchError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CountryFetcher for FixedFetcher {
    async fn fetch_all(&self) -> std::result::Result<Vec<Country>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Fetcher that panics.
pub struct PanickingFetcher;

#[async_trait]
impl CountryFetcher for PanickingFetcher {
    async fn fetch_all(&self) -> std::result::Result<Vec<Country>, FetchError> {
        panic!("fetcher bug")
    }
}

/// Memory store that refuses writes of one id and panics on writes of another.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub poisoned: Option<CountryId>,
    pub panicking: Option<CountryId>,
}

#[async_trait]
impl CountryStore for FlakyStore {
    async fn get(&self, id: CountryId) -> Result<Option<Country>> {
        self.inner.get(id).await
    }

    async fn remove(&self, id: CountryId) -> Result<()> {
        self.inner.remove(id).await
    }

    async fn select_all(&self) -> Result<Vec<Country>> {
        self.inner.select_all().await
    }

    async fn upsert(&self, country: &Country) -> Result<()> {
        if Some(country.id) == self.poisoned {
            return Err(SyncError::InvalidRecord(format!("{} is poisoned", country.name)));
        }
        if Some(country.id) == self.panicking {
            panic!("write of {} blew up", country.name);
        }
        self.inner.upsert(country).await
    }

    async fn search_by_name(&self, substring: &str) -> Result<Vec<Country>> {
        self.inner.search_by_name(substring).await
    }

    async fn search_by_continent(&self, continent: &str) -> Result<Vec<Country>> {
        self.inner.search_by_continent(continent).await
    }

    async fn search_by_language(&self, language: &str) -> Result<Vec<Country>> {
        self.inner.search_by_language(language).await
    }

    async fn clear(&self) -> Result<()> {
        self.inner.clear().await
    }
}

/// Store whose reads always fail.
pub struct BrokenStore;

#[async_trait]
impl CountryStore for BrokenStore {
    async fn get(&self, _id: CountryId) -> Result<Option<Country>> {
        Err(SyncError::Storage(sqlx::Error::PoolClosed))
    }

    async fn remove(&self, _id: CountryId) -> Result<()> {
        Err(SyncError::Storage(sqlx::Error::PoolClosed))
    }

    async fn select_all(&self) -> Result<Vec<Country>> {
        Err(SyncError::Storage(sqlx::Error::PoolClosed))
    }

    async fn upsert(&self, _country: &Country) -> Result<()> {
        Err(SyncError::Storage(sqlx::Error::PoolClosed))
    }

    async fn search_by_name(&self, _substring: &str) -> Result<Vec<Country>> {
        Ok(Vec::new())
    }

    async fn search_by_continent(&self, _continent: &str) -> Result<Vec<Country>> {
        Ok(Vec::new())
    }

    async fn search_by_language(&self, _language: &str) -> Result<Vec<Country>> {
        Ok(Vec::new())
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}

/// Store that panics on every read.
pub struct PanickingStore;

#[async_trait]
impl CountryStore for PanickingStore {
    async fn get(&self, _id: CountryId) -> Result<Option<Country>> {
        panic!("store bug")
    }

    async fn remove(&self, _id: CountryId) -> Result<()> {
        Ok(())
    }

    async fn select_all(&self) -> Result<Vec<Country>> {
        panic!("store bug")
    }

    async fn upsert(&self, _country: &Country) -> Result<()> {
        Ok(())
    }

    async fn search_by_name(&self, _substring: &str) -> Result<Vec<Country>> {
        Ok(Vec::new())
    }

    async fn search_by_continent(&self, _continent: &str) -> Result<Vec<Country>> {
        Ok(Vec::new())
    }

    async fn search_by_language(&self, _language: &str) -> Result<Vec<Country>> {
        Ok(Vec::new())
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }
}
