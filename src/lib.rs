//! readthrough - read-through entity resolution
//!
//! Resolves an entity by identifier from a fast cache, falling back to an
//! authoritative store on a miss and populating the cache afterwards. Cache
//! failures never reach the caller; store failures always do.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): entity model, errors and port traits
//! - **Service Layer** (`services`): the resolver and its cache helpers
//! - **Adapters** (`adapters`): SQLite, moka and in-memory implementations
//! - **Application Layer** (`application`): wiring configuration to adapters
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use readthrough::adapters::{cache::MokaEntityCache, memory::InMemoryEntityStore};
//! use readthrough::{EntityId, EntityResolver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = EntityResolver::new(Arc::new(InMemoryEntityStore::sample()))
//!         .with_cache(Arc::new(MokaEntityCache::new()));
//!     let user = resolver.resolve(&EntityId::Number(1)).await?;
//!     println!("{:?}", user.name());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CacheError, ResolveError, ResolveResult, StoreError};
pub use domain::models::{CacheBackend, CacheConfig, Config, Entity, EntityId};
pub use domain::ports::{EntityCache, EntityStore, NullEntityCache};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{resolve, resolve_with_ttl, EntityResolver, DEFAULT_CACHE_TTL};
