use crate::constants::TIMESTAMP_FORMAT;
use crate::db::repositories::city::CityRepository;
use crate::entities::{prelude::*, searches};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;

pub struct SearchRepository {
    conn: DatabaseConnection,
}

impl SearchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Appends a search and registers the city for autocomplete in one transaction.
    pub async fn record(
        &self,
        city: &str,
        latitude: f64,
        longitude: f64,
        user_id: &str,
    ) -> Result<i32> {
        let txn = self.conn.begin().await?;

        let active_model = searches::ActiveModel {
            city: Set(city.to_string()),
            latitude: Set(Some(latitude)),
            longitude: Set(Some(longitude)),
            user_id: Set(Some(user_id.to_string())),
            timestamp: Set(chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()),
            ..Default::default()
        };

        let result = Searches::insert(active_model).exec(&txn).await?;

        CityRepository::insert_or_ignore(&txn, city, latitude, longitude).await?;

        txn.commit().await?;
        Ok(result.last_insert_id)
    }

    pub async fn history(&self, user_id: &str, limit: u64) -> Result<Vec<HistoryEntry>> {
        let rows = Searches::find()
            .select_only()
            .column(searches::Column::City)
            .column_as(searches::Column::Timestamp, "time")
            .filter(searches::Column::UserId.eq(user_id))
            .order_by_desc(searches::Column::Timestamp)
            .order_by_desc(searches::Column::Id)
            .limit(limit)
            .into_model::<HistoryEntry>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn stats(&self, limit: u64) -> Result<Vec<CityStat>> {
        let rows = Searches::find()
            .select_only()
            .column(searches::Column::City)
            .column_as(searches::Column::Id.count(), "count")
            .group_by(searches::Column::City)
            .order_by_desc(searches::Column::Id.count())
            .order_by_asc(searches::Column::City)
            .limit(limit)
            .into_model::<CityStat>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Searches::find().count(&self.conn).await?;
        Ok(count)
    }

    /// Deletes searches recorded strictly before `cutoff` (a [`TIMESTAMP_FORMAT`] string).
    pub async fn prune_older_than(&self, cutoff: &str) -> Result<u64> {
        let result = Searches::delete_many()
            .filter(searches::Column::Timestamp.lt(cutoff))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct HistoryEntry {
    pub city: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct CityStat {
    pub city: String,
    pub count: i64,
}
