//! SQLite-backed entity cache.
//!
//! Entries live in `cache_entries` with an absolute expiry in epoch
//! milliseconds. Expired rows read as a miss and are removed by
//! [`SqliteEntityCache::purge_expired`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::domain::errors::CacheResult;
use crate::domain::ports::EntityCache;

#[derive(Clone)]
pub struct SqliteEntityCache {
    pool: SqlitePool,
}

impl SqliteEntityCache {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Delete expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> CacheResult<u64> {
        let result = sqlx::query("DELETE FROM cache_entries WHERE expires_at <= ?")
            .bind(now_millis())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn expiry_millis(ttl: Duration) -> i64 {
    let ttl = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    now_millis().saturating_add(ttl)
}

#[async_trait]
impl EntityCache for SqliteEntityCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT value FROM cache_entries WHERE key = ? AND expires_at > ?"
        )
        .bind(key)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        sqlx::query(
            r"INSERT INTO cache_entries (key, value, expires_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   expires_at = excluded.expires_at"
        )
        .bind(key)
        .bind(value)
        .bind(expiry_millis(ttl))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
