use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{SEED_CITIES, TIMESTAMP_FORMAT, limits};
use crate::entities::cities;

pub mod migrator;
pub mod repositories;

pub use repositories::search::{CityStat, HistoryEntry};

/// Handle to the weather history database.
///
/// Cheap to clone; every operation borrows a pooled connection (or opens its own
/// transaction) for its duration only.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Connects and runs [`Store::initialize`].
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let store = Self::connect(db_url, max_connections, min_connections).await?;
        store.initialize().await?;
        Ok(store)
    }

    /// Opens the connection pool without touching the schema.
    pub async fn connect(db_url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        info!(
            "Database connected (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Creates missing tables and seeds the reference cities. Safe to call on every start.
    pub async fn initialize(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::up(&self.conn, None).await?;
        self.city_repo().seed(SEED_CITIES).await?;

        info!("Database initialized ({} reference cities)", SEED_CITIES.len());
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn city_repo(&self) -> repositories::city::CityRepository {
        repositories::city::CityRepository::new(self.conn.clone())
    }

    fn search_repo(&self) -> repositories::search::SearchRepository {
        repositories::search::SearchRepository::new(self.conn.clone())
    }

    /// Logs a search and makes its city available for autocomplete.
    ///
    /// Both writes commit together or not at all; errors propagate.
    pub async fn record_search(
        &self,
        city: &str,
        latitude: f64,
        longitude: f64,
        user_id: &str,
    ) -> Result<i32> {
        self.search_repo()
            .record(city, latitude, longitude, user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(operation = "record_search", city = %city, error = %e, "Failed to record search");
            })
    }

    /// The user's most recent searches, newest first. Empty on storage errors.
    pub async fn get_user_history(&self, user_id: &str) -> Vec<HistoryEntry> {
        fail_soft(
            "get_user_history",
            user_id,
            self.search_repo()
                .history(user_id, limits::HISTORY_LIMIT)
                .await,
        )
    }

    /// City names containing `fragment`, ascending. Empty on storage errors.
    pub async fn autocomplete_cities(&self, fragment: &str) -> Vec<String> {
        fail_soft(
            "autocomplete_cities",
            fragment,
            self.city_repo()
                .autocomplete(fragment, limits::AUTOCOMPLETE_LIMIT)
                .await,
        )
    }

    /// Search counts per city, most popular first. Empty on storage errors.
    pub async fn get_city_stats(&self) -> Vec<CityStat> {
        fail_soft(
            "get_city_stats",
            "",
            self.search_repo().stats(limits::STATS_LIMIT).await,
        )
    }

    pub async fn get_city(&self, name: &str) -> Result<Option<cities::Model>> {
        self.city_repo().get_by_name(name).await
    }

    pub async fn search_count(&self) -> Result<u64> {
        self.search_repo().count().await
    }

    /// Deletes search records older than `older_than_days`. Cities are never pruned.
    pub async fn prune_searches(&self, older_than_days: u32) -> Result<u64> {
        let cutoff = (chrono::Utc::now() - chrono::Duration::days(i64::from(older_than_days)))
            .format(TIMESTAMP_FORMAT)
            .to_string();

        let removed = self.search_repo().prune_older_than(&cutoff).await?;
        info!(
            removed,
            older_than_days, "Pruned search history older than {}", cutoff
        );
        Ok(removed)
    }
}

fn fail_soft<T>(operation: &str, input: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(operation, input, error = %e, "Storage read failed, returning empty result");
        Vec::new()
    })
}
