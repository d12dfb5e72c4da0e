//! Builds an [`EntityResolver`] from configuration.

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use crate::adapters::cache::MokaEntityCache;
use crate::adapters::sqlite::{SqliteEntityCache, SqliteEntityStore};
use crate::domain::models::{CacheBackend, CacheConfig};
use crate::domain::ports::EntityCache;
use crate::services::EntityResolver;

/// Cache adapter for the configured backend; `None` for [`CacheBackend::None`].
pub fn build_cache(config: &CacheConfig, pool: &SqlitePool) -> Option<Arc<dyn EntityCache>> {
    match config.backend {
        CacheBackend::None => None,
        CacheBackend::Memory => Some(Arc::new(MokaEntityCache::with_capacity(config.max_capacity))),
        CacheBackend::Sqlite => Some(Arc::new(SqliteEntityCache::new(pool.clone()))),
    }
}

/// Resolver over the `SQLite` entity store, fronted by the configured cache.
pub fn build_resolver(config: &CacheConfig, pool: &SqlitePool) -> EntityResolver {
    let store = Arc::new(SqliteEntityStore::new(pool.clone()));
    let resolver = EntityResolver::new(store).with_ttl(config.ttl());

    debug!(backend = config.backend.as_str(), ttl_secs = config.ttl_secs, "building resolver");

    match build_cache(config, pool) {
        Some(cache) => resolver.with_cache(cache),
        None => resolver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use crate::domain::models::{Entity, EntityId};
    use std::time::Duration;

    fn cache_config(backend: CacheBackend) -> CacheConfig {
        CacheConfig {
            backend,
            ttl_secs: 120,
            max_capacity: 16,
        }
    }

    #[tokio::test]
    async fn test_none_backend_has_no_cache() {
        let pool = create_migrated_test_pool().await.unwrap();
        let resolver = build_resolver(&cache_config(CacheBackend::None), &pool);

        assert!(!resolver.has_cache());
        assert_eq!(resolver.ttl(), Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_sqlite_backend_populates_cache_table() {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteEntityStore::new(pool.clone())
            .upsert(&Entity::user(2, "Jane Doe", "jane@example.com"))
            .await
            .unwrap();

        let resolver = build_resolver(&cache_config(CacheBackend::Sqlite), &pool);
        assert!(resolver.has_cache());
        resolver.resolve(&EntityId::Number(2)).await.unwrap();

        let cached = SqliteEntityCache::new(pool).get("entity:2").await.unwrap();
        assert_eq!(
            cached.as_deref(),
            Some(r#"{"id":2,"name":"Jane Doe","email":"jane@example.com"}"#)
        );
    }

    #[tokio::test]
    async fn test_memory_backend_is_built() {
        let pool = create_migrated_test_pool().await.unwrap();
        assert!(build_cache(&cache_config(CacheBackend::Memory), &pool).is_some());
    }
}
