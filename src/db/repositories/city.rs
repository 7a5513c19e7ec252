use crate::entities::{cities, prelude::*};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// Repository for the `cities` autocomplete table.
///
/// Rows are insert-or-ignore only: the first coordinates stored for a name win.
pub struct CityRepository {
    conn: DatabaseConnection,
}

impl CityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn active_model(name: &str, latitude: f64, longitude: f64) -> cities::ActiveModel {
        cities::ActiveModel {
            name: Set(name.to_string()),
            latitude: Set(Some(latitude)),
            longitude: Set(Some(longitude)),
            ..Default::default()
        }
    }

    fn ignore_existing_name() -> sea_orm::sea_query::OnConflict {
        sea_orm::sea_query::OnConflict::column(cities::Column::Name)
            .do_nothing()
            .to_owned()
    }

    pub async fn seed(&self, entries: &[(&str, f64, f64)]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let txn = self.conn.begin().await?;

        let models = entries
            .iter()
            .map(|(name, lat, lon)| Self::active_model(name, *lat, *lon));

        Cities::insert_many(models)
            .on_conflict(Self::ignore_existing_name())
            .exec_without_returning(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Inserts the city unless the name is already known.
    ///
    /// Takes any connection so it can join a caller's transaction.
    pub async fn insert_or_ignore<C: ConnectionTrait>(
        conn: &C,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<u64> {
        let inserted = Cities::insert(Self::active_model(name, latitude, longitude))
            .on_conflict(Self::ignore_existing_name())
            .exec_without_returning(conn)
            .await?;

        Ok(inserted)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<cities::Model>> {
        let row = Cities::find()
            .filter(cities::Column::Name.eq(name))
            .one(&self.conn)
            .await?;

        Ok(row)
    }

    pub async fn autocomplete(&self, fragment: &str, limit: u64) -> Result<Vec<String>> {
        let names: Vec<String> = Cities::find()
            .select_only()
            .column(cities::Column::Name)
            .filter(cities::Column::Name.contains(fragment))
            .order_by_asc(cities::Column::Name)
            .distinct()
            .limit(limit)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(names)
    }
}
