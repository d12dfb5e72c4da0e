//! Cache key derivation and the entity wire format.
//!
//! The read path and the write path of the resolver both go through these
//! functions, so anything the resolver writes it can read back.

use crate::domain::models::{Entity, EntityId};

/// Namespace prefix of every cache key.
pub const CACHE_KEY_PREFIX: &str = "entity";

/// Derive the cache key for an identifier: `entity:<id>`.
///
/// The key uses the display form of the identifier, so `Number(7)` and
/// `Text("7")` share `entity:7` even though the stores keep them apart. Mixing
/// both forms for the same digits means whichever is cached first answers for
/// both until the entry expires.
pub fn cache_key(id: &EntityId) -> String {
    format!("{CACHE_KEY_PREFIX}:{id}")
}

/// Encode an entity for storage in the cache.
pub fn encode(entity: &Entity) -> serde_json::Result<String> {
    serde_json::to_string(entity)
}

/// Decode a cached entity.
pub fn decode(raw: &str) -> serde_json::Result<Entity> {
    serde_json::from_str(raw)
}
