//! Read-through entity resolution.
//!
//! Resolution order for one identifier:
//! 1. reject blank identifiers without touching any collaborator
//! 2. cache lookup under `entity:<id>`; a decodable hit short-circuits
//! 3. store lookup; absence is `NotFound`, failure propagates unchanged
//! 4. best-effort cache population with the configured TTL
//!
//! Cache failures in steps 2 and 4 are absorbed by [`BestEffortCache`].
//! There is no request coalescing: concurrent misses for the same id each
//! query the store and each write the cache.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::domain::errors::{ResolveError, ResolveResult};
use crate::domain::models::{Entity, EntityId};
use crate::domain::ports::{EntityCache, EntityStore, NullEntityCache};
use crate::services::best_effort_cache::BestEffortCache;
use crate::services::entity_codec::{cache_key, decode, encode};

/// Lifetime of cache entries written on a store fallback.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Resolve `id` through `cache` (if any) and `store` with the default TTL.
pub async fn resolve(
    id: &EntityId,
    store: &dyn EntityStore,
    cache: Option<&dyn EntityCache>,
) -> ResolveResult<Entity> {
    resolve_with_ttl(id, store, cache, DEFAULT_CACHE_TTL).await
}

/// Resolve `id`, writing cache entries with the given `ttl`.
///
/// A `None` cache behaves as a cache that always misses and drops writes.
#[instrument(skip(store, cache), fields(cached = cache.is_some()))]
pub async fn resolve_with_ttl(
    id: &EntityId,
    store: &dyn EntityStore,
    cache: Option<&dyn EntityCache>,
    ttl: Duration,
) -> ResolveResult<Entity> {
    if id.is_blank() {
        return Err(ResolveError::InvalidArgument(
            "entity identifier is required".to_string(),
        ));
    }

    let cache = BestEffortCache::new(cache.unwrap_or(&NullEntityCache));
    let key = cache_key(id);

    if let Some(raw) = cache.lookup(&key).await {
        match decode(&raw) {
            Ok(entity) => {
                debug!(%key, "cache hit");
                return Ok(entity);
            }
            Err(err) => warn!(%key, error = %err, "ignoring undecodable cache entry"),
        }
    }

    debug!(%key, "cache miss, querying store");
    let entity = store
        .find(id)
        .await?
        .ok_or_else(|| ResolveError::NotFound(id.clone()))?;

    match encode(&entity) {
        Ok(value) => cache.store(&key, &value, ttl).await,
        Err(err) => warn!(%key, error = %err, "failed to encode entity for cache"),
    }

    Ok(entity)
}

/// Resolver service holding its collaborators.
///
/// Cloning is cheap; the store and cache are shared behind `Arc`.
#[derive(Clone)]
pub struct EntityResolver {
    store: Arc<dyn EntityStore>,
    cache: Option<Arc<dyn EntityCache>>,
    ttl: Duration,
}

impl EntityResolver {
    /// Resolver without a cache.
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            cache: None,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn EntityCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub const fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn resolve(&self, id: &EntityId) -> ResolveResult<Entity> {
        resolve_with_ttl(id, self.store.as_ref(), self.cache.as_deref(), self.ttl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{CacheError, CacheResult, StoreError, StoreResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        entities: HashMap<EntityId, Entity>,
        failure: Option<String>,
        calls: Mutex<Vec<EntityId>>,
    }

    impl RecordingStore {
        fn with(entities: Vec<Entity>) -> Self {
            Self {
                entities: entities.into_iter().map(|e| (e.id.clone(), e)).collect(),
                ..Self::default()
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<EntityId> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EntityStore for RecordingStore {
        async fn find(&self, id: &EntityId) -> StoreResult<Option<Entity>> {
            self.calls.lock().unwrap().push(id.clone());
            if let Some(message) = &self.failure {
                return Err(StoreError::Unavailable(message.clone()));
            }
            Ok(self.entities.get(id).cloned())
        }
    }

    #[derive(Default)]
    struct RecordingCache {
        entries: Mutex<HashMap<String, String>>,
        fail_get: bool,
        fail_set: bool,
        gets: Mutex<Vec<String>>,
        sets: Mutex<Vec<(String, String, Duration)>>,
    }

    impl RecordingCache {
        fn seeded(key: &str, value: &str) -> Self {
            let cache = Self::default();
            cache.entries.lock().unwrap().insert(key.to_string(), value.to_string());
            cache
        }

        fn gets(&self) -> Vec<String> {
            self.gets.lock().unwrap().clone()
        }

        fn sets(&self) -> Vec<(String, String, Duration)> {
            self.sets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EntityCache for RecordingCache {
        async fn get(&self, key: &str) -> CacheResult<Option<String>> {
            self.gets.lock().unwrap().push(key.to_string());
            if self.fail_get {
                return Err(CacheError::Unavailable("connection refused".to_string()));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
            self.sets
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string(), ttl));
            if self.fail_set {
                return Err(CacheError::Backend("Redis error".to_string()));
            }
            self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn john() -> Entity {
        Entity::user(1, "John Doe", "john@example.com")
    }

    fn jane() -> Entity {
        Entity::user(2, "Jane Doe", "jane@example.com")
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let store = RecordingStore::default();
        let cache = RecordingCache::seeded(
            "entity:1",
            r#"{"id":1,"name":"John Doe","email":"john@example.com"}"#,
        );

        let entity = resolve(&EntityId::Number(1), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity, john());
        assert_eq!(cache.gets(), vec!["entity:1".to_string()]);
        assert!(store.calls().is_empty());
        assert!(cache.sets().is_empty());
    }

    #[tokio::test]
    async fn test_id_only_cached_entity_is_a_hit() {
        let store = RecordingStore::default();
        let cache = RecordingCache::seeded("entity:3", r#"{"id":3}"#);

        let entity = resolve(&EntityId::Number(3), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity, Entity::new(3));
        assert!(store.calls().is_empty());
        assert!(cache.sets().is_empty());
    }

    #[tokio::test]
    async fn test_cached_entity_with_null_field_is_a_hit() {
        let store = RecordingStore::default();
        let cache = RecordingCache::seeded("entity:4", r#"{"id":4,"name":"Ann","email":null}"#);

        let entity = resolve(&EntityId::Number(4), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity.name(), Some("Ann"));
        assert_eq!(entity.field("email"), Some(&serde_json::Value::Null));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cache_miss_falls_back_to_store_and_populates_cache() {
        let store = RecordingStore::with(vec![jane()]);
        let cache = RecordingCache::default();

        let entity = resolve(&EntityId::Number(2), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity, jane());
        assert_eq!(cache.gets(), vec!["entity:2".to_string()]);
        assert_eq!(store.calls(), vec![EntityId::Number(2)]);
        assert_eq!(
            cache.sets(),
            vec![(
                "entity:2".to_string(),
                r#"{"id":2,"name":"Jane Doe","email":"jane@example.com"}"#.to_string(),
                Duration::from_secs(3600),
            )]
        );
    }

    #[tokio::test]
    async fn test_store_miss_is_not_found_without_cache_write() {
        let store = RecordingStore::default();
        let cache = RecordingCache::default();

        let err = resolve(&EntityId::Number(3), &store, Some(&cache)).await.unwrap_err();

        assert!(matches!(err, ResolveError::NotFound(EntityId::Number(3))));
        assert!(cache.sets().is_empty());
    }

    #[tokio::test]
    async fn test_blank_identifiers_touch_nothing() {
        let store = RecordingStore::with(vec![john()]);
        let cache = RecordingCache::default();

        for id in [EntityId::Number(0), EntityId::Text(String::new())] {
            let err = resolve(&id, &store, Some(&cache)).await.unwrap_err();
            assert!(matches!(err, ResolveError::InvalidArgument(_)));
        }

        assert!(store.calls().is_empty());
        assert!(cache.gets().is_empty());
        assert!(cache.sets().is_empty());
    }

    #[tokio::test]
    async fn test_absent_cache_uses_store_only() {
        let store = RecordingStore::with(vec![Entity::user(5, "Bob Doe", "bob@example.com")]);

        let entity = resolve(&EntityId::Number(5), &store, None).await.unwrap();

        assert_eq!(entity.name(), Some("Bob Doe"));
        assert_eq!(store.calls(), vec![EntityId::Number(5)]);
    }

    #[tokio::test]
    async fn test_failed_cache_write_still_returns_entity() {
        let charlie = Entity::user(6, "Charlie Doe", "charlie@example.com");
        let store = RecordingStore::with(vec![charlie.clone()]);
        let cache = RecordingCache {
            fail_set: true,
            ..RecordingCache::default()
        };

        let entity = resolve(&EntityId::Number(6), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity, charlie);
        assert_eq!(cache.sets().len(), 1);
        assert_eq!(cache.sets()[0].0, "entity:6");
    }

    #[tokio::test]
    async fn test_failed_cache_read_falls_back_to_store() {
        let store = RecordingStore::with(vec![john()]);
        let cache = RecordingCache {
            fail_get: true,
            ..RecordingCache::default()
        };

        let entity = resolve(&EntityId::Number(1), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity, john());
        assert_eq!(store.calls().len(), 1);
        assert_eq!(cache.sets().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates_verbatim() {
        let store = RecordingStore::failing("database connection lost");
        let cache = RecordingCache::default();

        let err = resolve(&EntityId::Number(7), &store, Some(&cache)).await.unwrap_err();

        assert!(matches!(
            &err,
            ResolveError::StoreFailure(StoreError::Unavailable(msg)) if msg == "database connection lost"
        ));
        assert_eq!(err.to_string(), "database connection lost");
        assert!(cache.sets().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cached_value_is_a_miss() {
        let store = RecordingStore::with(vec![john()]);
        let cache = RecordingCache::seeded("entity:1", "");

        let entity = resolve(&EntityId::Number(1), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity, john());
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_cached_value_is_replaced() {
        let store = RecordingStore::with(vec![john()]);
        let cache = RecordingCache::seeded("entity:1", "{truncated");

        let entity = resolve(&EntityId::Number(1), &store, Some(&cache)).await.unwrap();

        assert_eq!(entity, john());
        assert_eq!(store.calls().len(), 1);
        let cached = cache.entries.lock().unwrap().get("entity:1").cloned().unwrap();
        assert_eq!(decode(&cached).unwrap(), john());
    }

    #[tokio::test]
    async fn test_second_resolution_is_served_from_cache() {
        let store = Arc::new(RecordingStore::with(vec![jane()]));
        let cache = Arc::new(RecordingCache::default());
        let resolver = EntityResolver::new(store.clone()).with_cache(cache.clone());

        let first = resolver.resolve(&EntityId::Number(2)).await.unwrap();
        let second = resolver.resolve(&EntityId::Number(2)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.calls().len(), 1);
        assert_eq!(cache.gets().len(), 2);
        assert_eq!(cache.sets().len(), 1);
    }

    #[tokio::test]
    async fn test_resolver_uses_configured_ttl() {
        let store = Arc::new(RecordingStore::with(vec![jane()]));
        let cache = Arc::new(RecordingCache::default());
        let resolver = EntityResolver::new(store)
            .with_cache(cache.clone())
            .with_ttl(Duration::from_secs(90));

        resolver.resolve(&EntityId::Number(2)).await.unwrap();

        assert_eq!(cache.sets()[0].2, Duration::from_secs(90));
    }

    #[tokio::test]
    async fn test_resolver_without_cache() {
        let store = Arc::new(RecordingStore::with(vec![john()]));
        let resolver = EntityResolver::new(store.clone());

        assert!(!resolver.has_cache());
        assert_eq!(resolver.ttl(), DEFAULT_CACHE_TTL);
        resolver.resolve(&EntityId::Number(1)).await.unwrap();
        resolver.resolve(&EntityId::Number(1)).await.unwrap();
        assert_eq!(store.calls().len(), 2);
    }
}
