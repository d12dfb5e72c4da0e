//! Entity cache port.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::errors::CacheResult;

/// Key/value cache holding serialized entities.
///
/// Implementations may fail on any call; the resolver treats every failure
/// as a miss (on `get`) or a skipped write (on `set`).
#[async_trait]
pub trait EntityCache: Send + Sync {
    /// Get the stored value for `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}
