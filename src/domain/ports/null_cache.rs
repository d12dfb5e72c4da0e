//! Null cache implementation.
//!
//! Stands in for an absent cache so the resolver never has to branch on
//! whether a cache was configured.

use async_trait::async_trait;
use std::time::Duration;

use super::EntityCache;
use crate::domain::errors::CacheResult;

/// A cache that never holds anything and accepts every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEntityCache;

impl NullEntityCache {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EntityCache for NullEntityCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullEntityCache::new();
        cache.set("entity:1", "{}", Duration::from_secs(60)).await.unwrap();
        assert!(cache.get("entity:1").await.unwrap().is_none());
    }
}
