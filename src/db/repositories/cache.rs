use super::format_timestamp;
use crate::entities::{prelude::*, results_cache};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = format_timestamp(Utc::now());

        // Opportunistic cleanup of expired entries.
        let _ = ResultsCache::delete_many()
            .filter(results_cache::Column::ExpiresAt.is_not_null())
            .filter(results_cache::Column::ExpiresAt.lte(&now))
            .exec(&self.conn)
            .await;

        let entry = ResultsCache::find_by_id(key.to_string())
            .filter(
                Condition::any()
                    .add(results_cache::Column::ExpiresAt.is_null())
                    .add(results_cache::Column::ExpiresAt.gt(&now)),
            )
            .one(&self.conn)
            .await?;

        Ok(entry.map(|e| e.payload))
    }

    /// Inserts the entry unless a live one already holds `key`. Returns
    /// whether a row was written. `expires_at` of `None` keeps the entry
    /// until purged.
    pub async fn add(
        &self,
        key: &str,
        payload: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let now = format_timestamp(Utc::now());

        // An expired row must not block the insert.
        ResultsCache::delete_many()
            .filter(results_cache::Column::CacheKey.eq(key))
            .filter(results_cache::Column::ExpiresAt.is_not_null())
            .filter(results_cache::Column::ExpiresAt.lte(&now))
            .exec(&self.conn)
            .await?;

        let active_model = results_cache::ActiveModel {
            cache_key: Set(key.to_string()),
            payload: Set(payload),
            created_at: Set(now),
            expires_at: Set(expires_at.map(format_timestamp)),
        };

        let inserted = ResultsCache::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(results_cache::Column::CacheKey)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        ResultsCache::delete_by_id(key.to_string())
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn purge(&self) -> Result<u64> {
        let result = ResultsCache::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
