use async_trait::async_trait;
use atlas_engine::{Country, CountryId, CountrySnapshot};
use dashmap::DashMap;

use super::CountryStore;
use crate::error::Result;

/// In-memory country store.
///
/// Per-key writes are atomic; concurrent upserts of the same id leave exactly
/// one of the written values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    countries: DashMap<CountryId, Country>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated from a snapshot.
    pub fn from_snapshot(snapshot: CountrySnapshot) -> Self {
        let store = Self::new();
        store.import_snapshot(snapshot);
        store
    }

    /// Copy the current contents into a snapshot ordered by id.
    pub fn export_snapshot(&self) -> CountrySnapshot {
        self.countries
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Upsert every country in the snapshot.
    ///
    /// Returns the number of countries imported.
    pub fn import_snapshot(&self, snapshot: CountrySnapshot) -> usize {
        let countries = snapshot.into_countries();
        let imported = countries.len();
        for country in countries {
            self.countries.insert(country.id, country);
        }
        imported
    }

    fn collect_where(&self, predicate: impl Fn(&Country) -> bool) -> Vec<Country> {
        self.countries
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl CountryStore for MemoryStore {
    async fn get(&self, id: CountryId) -> Result<Option<Country>> {
        Ok(self.countries.get(&id).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, id: CountryId) -> Result<()> {
        self.countries.remove(&id);
        Ok(())
    }

    async fn select_all(&self) -> Result<Vec<Country>> {
        Ok(self.collect_where(|_| true))
    }

    async fn upsert(&self, country: &Country) -> Result<()> {
        self.countries.insert(country.id, country.clone());
        Ok(())
    }

    async fn search_by_name(&self, substring: &str) -> Result<Vec<Country>> {
        Ok(self.collect_where(|c| c.name.contains(substring)))
    }

    async fn search_by_continent(&self, continent: &str) -> Result<Vec<Country>> {
        Ok(self.collect_where(|c| c.has_continent(continent)))
    }

    async fn search_by_language(&self, language: &str) -> Result<Vec<Country>> {
        Ok(self.collect_where(|c| c.has_language(language)))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.countries.len())
    }

    async fn clear(&self) -> Result<()> {
        self.countries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spain() -> Country {
        Country::new("Kingdom of Spain", "es.png")
            .with_continents(["Europe"])
            .with_languages(["Spanish"])
    }

    fn chile() -> Country {
        Country::new("Republic of Chile", "cl.png")
            .with_continents(["South America"])
            .with_languages(["Spanish"])
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let store = MemoryStore::new();
        store.upsert(&spain()).await.unwrap();
        store
            .upsert(&spain().with_population(47_000_000))
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let stored = store.get(spain().id).await.unwrap().unwrap();
        assert_eq!(stored.population, 47_000_000);
    }

    #[tokio::test]
    async fn remove_absent_is_noop() {
        let store = MemoryStore::new();
        store.remove(42).await.unwrap();
        assert_eq!(store.get(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn searches() {
        let store = MemoryStore::new();
        store.upsert_many(&[spain(), chile()]).await;

        assert_eq!(store.search_by_name("Spain").await.unwrap().len(), 1);
        assert!(store.search_by_name("spain").await.unwrap().is_empty());
        assert_eq!(store.search_by_language("Spanish").await.unwrap().len(), 2);
        assert!(store.search_by_language("Span").await.unwrap().is_empty());

        let south = store.search_by_continent("South America").await.unwrap();
        assert_eq!(south, vec![chile()]);
        assert!(store.search_by_continent("America").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn snapshot_round_trip() {
        let store = MemoryStore::new();
        store.upsert_many(&[spain(), chile()]).await;

        let json = store.export_snapshot().to_json().unwrap();
        let restored = MemoryStore::from_snapshot(CountrySnapshot::from_json(&json).unwrap());

        let mut names: Vec<_> = restored
            .select_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Kingdom of Spain", "Republic of Chile"]);
    }

    #[tokio::test]
    async fn snapshot_export_is_deterministic() {
        let a = MemoryStore::new();
        a.upsert_many(&[spain(), chile()]).await;
        let b = MemoryStore::new();
        b.upsert_many(&[chile(), spain()]).await;

        assert_eq!(
            a.export_snapshot().to_json().unwrap(),
            b.export_snapshot().to_json().unwrap()
        );
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = MemoryStore::new();
        store.upsert(&spain()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.select_all().await.unwrap().is_empty());
    }
}
