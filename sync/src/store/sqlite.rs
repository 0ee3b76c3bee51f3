use std::str::FromStr;

use async_trait::async_trait;
use atlas_engine::{AssignedStatus, Country, CountryId};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::CountryStore;
use crate::error::{Result, SyncError};

const LIST_SEPARATOR: &str = ";";

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, continents, languages, flag, coat_of_arms,
           area, population, un_member, status
    FROM countries
"#;

/// SQLite-backed country store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url` and run
    /// pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Wrap an existing pool. Migrations are not run.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn fetch_where(&self, clause: &str, value: &str) -> Result<Vec<Country>> {
        let sql = format!("{} WHERE {} ORDER BY id", SELECT_COLUMNS, clause);
        let rows = sqlx::query_as::<_, StoredCountry>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(StoredCountry::into_country).collect()
    }
}

/// Create a connection pool for `database_url`.
///
/// In-memory databases are private to a connection, so their pool holds a
/// single connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn join_list(values: &[String]) -> String {
    values.join(LIST_SEPARATOR)
}

fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).map(str::to_string).collect()
}

/// A stored country row.
#[derive(Debug)]
struct StoredCountry {
    id: i64,
    name: String,
    continents: String,
    languages: String,
    flag: String,
    coat_of_arms: Option<String>,
    area: f64,
    population: i64,
    un_member: bool,
    status: String,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for StoredCountry {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(StoredCountry {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            continents: row.try_get("continents")?,
            languages: row.try_get("languages")?,
            flag: row.try_get("flag")?,
            coat_of_arms: row.try_get("coat_of_arms")?,
            area: row.try_get("area")?,
            population: row.try_get("population")?,
            un_member: row.try_get("un_member")?,
            status: row.try_get("status")?,
        })
    }
}

impl StoredCountry {
    fn into_country(self) -> Result<Country> {
        let population = u64::try_from(self.population).map_err(|_| {
            SyncError::InvalidRecord(format!(
                "stored population {} of {} is negative",
                self.population, self.name
            ))
        })?;

        let mut country = Country::new(self.name, self.flag)
            .with_id(self.id)
            .with_continents(split_list(&self.continents))
            .with_languages(split_list(&self.languages))
            .with_area(self.area)
            .with_population(population)
            .with_un_member(self.un_member)
            .with_status(AssignedStatus::from_wire(&self.status));
        country.coat_of_arms = self.coat_of_arms;
        Ok(country)
    }
}

#[async_trait]
impl CountryStore for SqliteStore {
    async fn get(&self, id: CountryId) -> Result<Option<Country>> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, StoredCountry>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(StoredCountry::into_country).transpose()
    }

    async fn remove(&self, id: CountryId) -> Result<()> {
        sqlx::query("DELETE FROM countries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn select_all(&self) -> Result<Vec<Country>> {
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let rows = sqlx::query_as::<_, StoredCountry>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(StoredCountry::into_country).collect()
    }

    async fn upsert(&self, country: &Country) -> Result<()> {
        let population = i64::try_from(country.population).map_err(|_| {
            SyncError::InvalidRecord(format!(
                "population {} of {} does not fit in storage",
                country.population, country.name
            ))
        })?;

        sqlx::query(
            r#"
            INSERT INTO countries (
                id, name, continents, languages, flag, coat_of_arms,
                area, population, un_member, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                continents = excluded.continents,
                languages = excluded.languages,
                flag = excluded.flag,
                coat_of_arms = excluded.coat_of_arms,
                area = excluded.area,
                population = excluded.population,
                un_member = excluded.un_member,
                status = excluded.status
            "#,
        )
        .bind(country.id)
        .bind(&country.name)
        .bind(join_list(&country.continents))
        .bind(join_list(&country.languages))
        .bind(&country.flag)
        .bind(&country.coat_of_arms)
        .bind(country.area)
        .bind(population)
        .bind(country.un_member)
        .bind(country.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn search_by_name(&self, substring: &str) -> Result<Vec<Country>> {
        self.fetch_where("instr(name, ?) > 0", substring).await
    }

    async fn search_by_continent(&self, continent: &str) -> Result<Vec<Country>> {
        self.fetch_where(
            "continents <> '' AND instr(';' || continents || ';', ';' || ? || ';') > 0",
            continent,
        )
        .await
    }

    async fn search_by_language(&self, language: &str) -> Result<Vec<Country>> {
        self.fetch_where(
            "languages <> '' AND instr(';' || languages || ';', ';' || ? || ';') > 0",
            language,
        )
        .await
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM countries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM countries")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
