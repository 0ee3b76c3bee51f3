//! Synchronizer - reconciles the local cache with the remote source.
//!
//! Every operation returns a phase stream: a `Loading` marker first, then
//! data and report phases, then a final `Idle` marker. Failures never end a
//! stream early; they surface as [`Phase::Report`] values.
//!
//! Streams are lazy. Nothing is read, fetched or written until the stream is
//! polled, and dropping a stream stops any further work. Writes that already
//! happened are kept.

use std::sync::Arc;

use async_stream::stream;
use atlas_engine::{Country, CountryId, LanguageOption, Phase};
use futures::Stream;

use crate::error::{guarded, SyncError};
use crate::fetch::CountryFetcher;
use crate::store::CountryStore;

pub use atlas_engine::{apply_filters, distinct_languages};

/// Phase stream carrying the full country list.
pub type CountriesPhase = Phase<Vec<Country>>;

/// Coordinates a [`CountryStore`] and a [`CountryFetcher`].
#[derive(Clone)]
pub struct Synchronizer {
    store: Arc<dyn CountryStore>,
    fetcher: Arc<dyn CountryFetcher>,
}

impl Synchronizer {
    pub fn new(store: Arc<dyn CountryStore>, fetcher: Arc<dyn CountryFetcher>) -> Self {
        Self { store, fetcher }
    }

    pub fn store(&self) -> &Arc<dyn CountryStore> {
        &self.store
    }

    /// Refresh the cache from the remote source.
    ///
    /// Emits the cached countries first when there are any, then the cache
    /// contents after reconciliation. A failed fetch is reported and the
    /// cached contents are emitted again.
    pub fn synchronize(&self) -> impl Stream<Item = CountriesPhase> + Send + 'static {
        let store = Arc::clone(&self.store);
        let fetcher = Arc::clone(&self.fetcher);

        stream! {
            yield Phase::loading();

            let mut store_failed = false;

            match guarded(store.select_all()).await {
                Ok(cached) => {
                    tracing::debug!("Cache holds {} countries", cached.len());
                    if !cached.is_empty() {
                        yield Phase::Data(cached);
                    }
                }
                Err(e) => {
                    store_failed = true;
                    yield Phase::Report(e.to_report());
                }
            }

            if !store_failed {
                let fetch = async { fetcher.fetch_all().await.map_err(SyncError::from) };

                match guarded(fetch).await {
                    Ok(countries) => {
                        tracing::debug!("Fetched {} countries", countries.len());
                        if !countries.is_empty() {
                            let summary = store.upsert_many(&countries).await;
                            if summary.is_complete() {
                                tracing::debug!("Stored {} countries", summary.succeeded);
                            } else {
                                tracing::warn!(
                                    "Stored {} countries, {} failed",
                                    summary.succeeded,
                                    summary.failed.len()
                                );
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Fetch failed: {}", e);
                        yield Phase::Report(e.to_report());
                    }
                }

                match guarded(store.select_all()).await {
                    Ok(countries) => {
                        yield Phase::Data(countries);
                    }
                    Err(e) => {
                        yield Phase::Report(e.to_report());
                    }
                }
            }

            yield Phase::idle();
        }
    }

    /// Emit the cache contents without contacting the remote source.
    pub fn cached(&self) -> impl Stream<Item = CountriesPhase> + Send + 'static {
        let store = Arc::clone(&self.store);

        stream! {
            yield Phase::loading();

            match guarded(store.select_all()).await {
                Ok(countries) => {
                    yield Phase::Data(countries);
                }
                Err(e) => {
                    yield Phase::Report(e.to_report());
                }
            }

            yield Phase::idle();
        }
    }

    /// Look up a single cached country.
    pub fn get_by_id(
        &self,
        id: CountryId,
    ) -> impl Stream<Item = Phase<Country>> + Send + 'static {
        let store = Arc::clone(&self.store);

        stream! {
            yield Phase::loading();

            match guarded(store.get(id)).await {
                Ok(Some(country)) => {
                    yield Phase::Data(country);
                }
                Ok(None) => {
                    tracing::debug!("Country {} not in cache", id);
                    let err = SyncError::from(atlas_engine::Error::CountryNotFound(id));
                    yield Phase::Report(err.to_report());
                }
                Err(e) => {
                    yield Phase::Report(e.to_report());
                }
            }

            yield Phase::idle();
        }
    }

    /// Distinct languages spoken across the cached countries.
    pub fn language_options(
        &self,
    ) -> impl Stream<Item = Phase<Vec<LanguageOption>>> + Send + 'static {
        let store = Arc::clone(&self.store);

        stream! {
            yield Phase::loading();

            let languages = guarded(store.select_all())
                .await
                .and_then(|countries| distinct_languages(&countries).map_err(SyncError::from));

            match languages {
                Ok(options) => {
                    yield Phase::Data(options);
                }
                Err(e) => {
                    yield Phase::Report(e.to_report());
                }
            }

            yield Phase::idle();
        }
    }
}
