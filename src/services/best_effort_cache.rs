//! Failure-absorbing wrapper around an [`EntityCache`].

use std::time::Duration;
use tracing::warn;

use crate::domain::ports::EntityCache;

/// Degrades every cache failure to a miss or a skipped write.
///
/// Failures are logged at `warn` and never returned.
pub struct BestEffortCache<'a> {
    inner: &'a dyn EntityCache,
}

impl<'a> BestEffortCache<'a> {
    pub fn new(inner: &'a dyn EntityCache) -> Self {
        Self { inner }
    }

    /// Read `key`; empty values and failed reads both count as a miss.
    pub async fn lookup(&self, key: &str) -> Option<String> {
        match self.inner.get(key).await {
            Ok(Some(value)) if !value.is_empty() => Some(value),
            Ok(_) => None,
            Err(err) => {
                warn!(key, error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Write `value` under `key`. No retry.
    pub async fn store(&self, key: &str, value: &str, ttl: Duration) {
        if let Err(err) = self.inner.set(key, value, ttl).await {
            warn!(key, error = %err, "cache write failed, entry not cached");
        }
    }
}
