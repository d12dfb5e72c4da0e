pub mod config;
pub mod entity;

pub use config::{CacheBackend, CacheConfig, Config, DatabaseConfig, LoggingConfig};
pub use entity::{Entity, EntityId};
