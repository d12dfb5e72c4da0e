//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use readthrough::domain::errors::{CacheError, CacheResult, StoreResult};
use readthrough::{Entity, EntityCache, EntityId, EntityStore};

/// Store wrapper counting `find` calls.
pub struct CountingStore<S> {
    inner: S,
    finds: AtomicUsize,
}

impl<S: EntityStore> CountingStore<S> {
    pub fn new(inner: S) -> Arc<Self> {
        Arc::new(Self {
            inner,
            finds: AtomicUsize::new(0),
        })
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: EntityStore + 'static> EntityStore for CountingStore<S> {
    async fn find(&self, id: &EntityId) -> StoreResult<Option<Entity>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(id).await
    }
}

/// Cache whose every call fails, as when the cache tier is down.
#[derive(Default)]
pub struct DownCache {
    calls: AtomicUsize,
}

impl DownCache {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityCache for DownCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

pub fn john() -> Entity {
    Entity::user(1, "John Doe", "john@example.com")
}

pub fn jane() -> Entity {
    Entity::user(2, "Jane Doe", "jane@example.com")
}
