//! Entity store port.

use async_trait::async_trait;

use crate::domain::errors::StoreResult;
use crate::domain::models::{Entity, EntityId};

/// Authoritative source of entities.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Find an entity by identifier.
    ///
    /// `Ok(None)` means the store has no such entity; `Err` is an
    /// infrastructure failure and is propagated to the caller unchanged.
    async fn find(&self, id: &EntityId) -> StoreResult<Option<Entity>>;
}
