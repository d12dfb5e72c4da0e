//! In-memory implementation of the EntityStore.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::errors::StoreResult;
use crate::domain::models::{Entity, EntityId};
use crate::domain::ports::EntityStore;

/// The two sample users used by demos and `init --seed`.
pub fn sample_entities() -> Vec<Entity> {
    vec![
        Entity::user(1, "John Doe", "john@example.com"),
        Entity::user(2, "Jane Doe", "jane@example.com"),
    ]
}

/// Map-backed store, useful for tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    entities: RwLock<HashMap<EntityId, Entity>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let entities = entities.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            entities: RwLock::new(entities),
        }
    }

    /// Store seeded with [`sample_entities`].
    pub fn sample() -> Self {
        Self::with_entities(sample_entities())
    }

    /// Insert or replace an entity.
    pub async fn insert(&self, entity: Entity) {
        self.entities.write().await.insert(entity.id.clone(), entity);
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn find(&self, id: &EntityId) -> StoreResult<Option<Entity>> {
        Ok(self.entities.read().await.get(id).cloned())
    }
}
