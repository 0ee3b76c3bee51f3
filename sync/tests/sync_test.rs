//! Integration tests for the synchronizer phase streams.

mod common;

use std::sync::Arc;

use atlas_engine::{Country, Phase, Progress, NETWORK_ERROR_TITLE};
use atlas_sync::{CountryStore, FetchError, MemoryStore, Synchronizer};
use common::*;
use futures::StreamExt;

fn names(countries: &[Country]) -> Vec<String> {
    let mut names: Vec<_> = countries.iter().map(|c| c.name.clone()).collect();
    names.sort();
    names
}

#[cfg(test)]
mod synchronize_tests {
    use super::*;

    #[tokio::test]
    async fn empty_cache_valid_fetch() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = FixedFetcher::countries(countries(250));
        let sync = Synchronizer::new(store.clone(), fetcher.clone());

        let phases = collect(sync.synchronize()).await;

        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0], Phase::Loading(Progress::Loading));
        assert_eq!(phases[1].data().map(Vec::len), Some(250));
        assert!(phases[2].is_idle());
        assert_eq!(store.count().await.unwrap(), 250);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn empty_cache_empty_fetch() {
        let sync = Synchronizer::new(
            Arc::new(MemoryStore::new()),
            FixedFetcher::countries(Vec::new()),
        );

        let phases = collect(sync.synchronize()).await;

        assert_eq!(
            phases,
            vec![Phase::loading(), Phase::Data(Vec::new()), Phase::idle()]
        );
    }

    #[tokio::test]
    async fn decode_error_with_empty_cache() {
        let sync = Synchronizer::new(
            Arc::new(MemoryStore::new()),
            FixedFetcher::failing(FetchError::Decode("expected value at line 1".into())),
        );

        let phases = collect(sync.synchronize()).await;

        assert_eq!(phases.len(), 4);
        assert_eq!(phases[0], Phase::loading());
        let report = phases[1].report().unwrap();
        assert_eq!(report.title, NETWORK_ERROR_TITLE);
        assert!(report.description.contains("expected value"));
        assert_eq!(phases[2], Phase::Data(Vec::new()));
        assert!(phases[3].is_idle());
    }

    #[tokio::test]
    async fn transport_error_falls_back_to_stale_cache() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_many(&countries(5)).await;
        let sync = Synchronizer::new(
            store.clone(),
            FixedFetcher::failing(FetchError::Transport("connection refused".into())),
        );

        let phases = collect(sync.synchronize()).await;

        assert_eq!(phases.len(), 5);
        assert_eq!(phases[0], Phase::loading());
        assert_eq!(phases[1].data().map(Vec::len), Some(5));
        assert_eq!(phases[2].report().unwrap().title, "Network Data Error");
        assert_eq!(phases[3].data().map(Vec::len), Some(5));
        assert!(phases[4].is_idle());
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn decode_error_falls_back_to_stale_cache() {
        let cached = countries(7);
        let store = Arc::new(MemoryStore::new());
        store.upsert_many(&cached).await;
        let sync = Synchronizer::new(
            store.clone(),
            FixedFetcher::failing(FetchError::Decode("missing field `flags`".into())),
        );

        let phases = collect(sync.synchronize()).await;

        assert_eq!(phases.len(), 5);
        assert_eq!(phases[0], Phase::loading());
        assert_eq!(names(phases[1].data().unwrap()), names(&cached));
        let report = phases[2].report().unwrap();
        assert_eq!(report.title, NETWORK_ERROR_TITLE);
        assert_eq!(report.description, "missing field `flags`");
        assert_eq!(names(phases[3].data().unwrap()), names(&cached));
        assert!(phases[4].is_idle());
        assert_eq!(store.count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn cached_data_precedes_refreshed_data() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_many(&countries(2)).await;
        let sync = Synchronizer::new(store, FixedFetcher::countries(countries(4)));

        let phases = collect(sync.synchronize()).await;

        let sizes: Vec<_> = phases.iter().filter_map(|p| p.data().map(Vec::len)).collect();
        assert_eq!(sizes, vec![2, 4]);
        assert!(phases.last().unwrap().is_idle());
    }

    #[tokio::test]
    async fn synchronize_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let sync = Synchronizer::new(store.clone(), FixedFetcher::countries(countries(10)));

        collect(sync.synchronize()).await;
        let first = names(&store.select_all().await.unwrap());
        collect(sync.synchronize()).await;
        let second = names(&store.select_all().await.unwrap());

        assert_eq!(first, second);
        assert_eq!(store.count().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn poisoned_record_does_not_stop_the_rest() {
        let fetched = countries(3);
        let store = Arc::new(FlakyStore {
            poisoned: Some(fetched[1].id),
            ..FlakyStore::default()
        });
        let sync = Synchronizer::new(store.clone(), FixedFetcher::countries(fetched.clone()));

        let phases = collect(sync.synchronize()).await;

        // Write failures are logged, not reported.
        assert!(phases.iter().all(|p| p.report().is_none()));
        let stored = phases[1].data().unwrap();
        assert_eq!(stored.len(), 2);
        assert!(!stored.iter().any(|c| c.id == fetched[1].id));
    }

    #[tokio::test]
    async fn upsert_many_summarises_failures() {
        let fetched = countries(3);
        let store = FlakyStore {
            poisoned: Some(fetched[0].id),
            ..FlakyStore::default()
        };

        let summary = store.upsert_many(&fetched).await;

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].id, fetched[0].id);
        assert!(summary.failed[0].reason.contains("poisoned"));
    }

    #[tokio::test]
    async fn panicking_write_does_not_stop_the_rest() {
        let fetched = countries(4);
        let store = Arc::new(FlakyStore {
            panicking: Some(fetched[0].id),
            ..FlakyStore::default()
        });

        let summary = store.upsert_many(&fetched).await;
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].id, fetched[0].id);
        assert!(summary.failed[0].reason.contains("blew up"));

        store.clear().await.unwrap();
        let sync = Synchronizer::new(store.clone(), FixedFetcher::countries(fetched.clone()));
        let phases = collect(sync.synchronize()).await;

        assert!(phases.iter().all(|p| p.report().is_none()));
        assert_eq!(phases[1].data().map(Vec::len), Some(3));
        assert!(phases[2].is_idle());
    }

    #[tokio::test]
    async fn dropping_the_stream_stops_work() {
        let fetcher = FixedFetcher::countries(countries(3));
        let store = Arc::new(MemoryStore::new());
        let sync = Synchronizer::new(store.clone(), fetcher.clone());

        // Only the loading marker is consumed; nothing after it runs.
        let first: Vec<_> = sync.synchronize().take(1).collect().await;

        assert_eq!(first, vec![Phase::loading()]);
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn store_failure_is_reported_then_idle() {
        let fetcher = FixedFetcher::countries(countries(3));
        let sync = Synchronizer::new(Arc::new(BrokenStore), fetcher.clone());

        let phases = collect(sync.synchronize()).await;

        assert_eq!(phases.len(), 3);
        assert_eq!(phases[1].report().unwrap().title, "Error");
        assert!(phases[2].is_idle());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn panics_become_reports() {
        let sync = Synchronizer::new(
            Arc::new(PanickingStore),
            FixedFetcher::countries(Vec::new()),
        );
        let phases = collect(sync.synchronize()).await;
        assert_eq!(phases[1].report().unwrap().description, "Internal error: store bug");
        assert!(phases.last().unwrap().is_idle());

        let sync = Synchronizer::new(Arc::new(MemoryStore::new()), Arc::new(PanickingFetcher));
        let phases = collect(sync.synchronize()).await;
        assert_eq!(phases.len(), 4);
        assert_eq!(phases[1].report().unwrap().title, "Error");
        assert_eq!(phases[2], Phase::Data(Vec::new()));
        assert!(phases[3].is_idle());
    }

    #[tokio::test]
    async fn cached_emits_store_contents_only() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_many(&countries(2)).await;
        let fetcher = FixedFetcher::countries(countries(8));
        let sync = Synchronizer::new(store, fetcher.clone());

        let phases = collect(sync.cached()).await;

        assert_eq!(phases.len(), 3);
        assert_eq!(phases[1].data().map(Vec::len), Some(2));
        assert_eq!(fetcher.calls(), 0);
    }
}

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn get_by_id_found() {
        let fetched = countries(3);
        let store = Arc::new(MemoryStore::new());
        store.upsert_many(&fetched).await;
        let sync = Synchronizer::new(store, FixedFetcher::countries(Vec::new()));

        let phases = collect(sync.get_by_id(fetched[2].id)).await;

        assert_eq!(
            phases,
            vec![Phase::loading(), Phase::Data(fetched[2].clone()), Phase::idle()]
        );
    }

    #[tokio::test]
    async fn get_by_id_missing() {
        let sync = Synchronizer::new(
            Arc::new(MemoryStore::new()),
            FixedFetcher::countries(Vec::new()),
        );

        let phases = collect(sync.get_by_id(404)).await;

        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0], Phase::loading());
        let report = phases[1].report().unwrap();
        assert_eq!(report.title, "Error");
        assert_eq!(report.description, "That country does not exist in the cache.");
        assert!(phases[2].is_idle());
    }

    #[tokio::test]
    async fn language_options_from_cache() {
        let store = Arc::new(MemoryStore::new());
        store
            .upsert(&Country::new("Swiss Confederation", "ch.png").with_languages([
                "German", "French", "Italian", "Romansh",
            ]))
            .await
            .unwrap();
        store
            .upsert(&Country::new("French Republic", "fr.png").with_languages(["French"]))
            .await
            .unwrap();
        let sync = Synchronizer::new(store, FixedFetcher::countries(Vec::new()));

        let phases = collect(sync.language_options()).await;

        let languages: Vec<_> = phases[1]
            .data()
            .unwrap()
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(languages, vec!["French", "German", "Italian", "Romansh"]);
        assert!(phases[2].is_idle());
    }

    #[tokio::test]
    async fn language_options_on_empty_cache() {
        let sync = Synchronizer::new(
            Arc::new(MemoryStore::new()),
            FixedFetcher::countries(Vec::new()),
        );

        let phases = collect(sync.language_options()).await;

        assert_eq!(phases.len(), 3);
        let report = phases[1].report().unwrap();
        assert_eq!(report.title, "Error");
        assert_eq!(report.description, "There aren't countries into cache.");
    }
}
