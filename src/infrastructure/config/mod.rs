//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{find_project_root, project_root_for, ConfigError, ConfigLoader, CONFIG_DIR, ENV_PREFIX};
