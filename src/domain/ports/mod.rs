//! Port trait definitions (Hexagonal Architecture)
//!
//! The resolver depends only on these traits:
//! - EntityStore: authoritative lookup by identifier
//! - EntityCache: best-effort key/value cache with per-entry TTL
//!
//! Adapters in `crate::adapters` implement them for SQLite, moka and
//! in-memory backends.

pub mod entity_cache;
pub mod entity_store;
pub mod null_cache;

pub use entity_cache::EntityCache;
pub use entity_store::EntityStore;
pub use null_cache::NullEntityCache;
