//! Service layer: the read-through resolver and its helpers.

pub mod best_effort_cache;
pub mod entity_codec;
pub mod entity_resolver;

pub use best_effort_cache::BestEffortCache;
pub use entity_codec::{cache_key, CACHE_KEY_PREFIX};
pub use entity_resolver::{resolve, resolve_with_ttl, EntityResolver, DEFAULT_CACHE_TTL};
