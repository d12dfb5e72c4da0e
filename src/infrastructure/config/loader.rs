use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::{CacheBackend, Config};

/// Directory holding project configuration and the default database.
pub const CONFIG_DIR: &str = ".readthrough";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "READTHROUGH_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid cache ttl_secs: {0}. Must be positive")]
    InvalidTtl(u64),

    #[error("Invalid cache max_capacity: {0}. Must be at least 1 for the memory backend")]
    InvalidMaxCapacity(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the project containing the current directory.
    ///
    /// The project root is the nearest ancestor holding `.readthrough/`,
    /// falling back to the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .readthrough/config.yaml (project config, created by init)
    /// 3. .readthrough/local.yaml (local overrides, optional)
    /// 4. Environment variables (READTHROUGH_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let root = find_project_root(&cwd).unwrap_or(cwd);
        Self::load_from(&root)
    }

    /// Load configuration rooted at `base` instead of the current directory.
    ///
    /// Relative paths in the result are anchored at `base`.
    pub fn load_from(base: &Path) -> Result<Config> {
        let config_dir = base.join(CONFIG_DIR);
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_dir.join("config.yaml")))
            .merge(Yaml::file(config_dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        anchor_paths(&mut config, base);
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Relative paths in the file are anchored at [`project_root_for`] of it.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        anchor_paths(&mut config, &project_root_for(path));
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(config.database.max_connections));
        }

        if config.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidTtl(config.cache.ttl_secs));
        }

        if config.cache.backend == CacheBackend::Memory && config.cache.max_capacity == 0 {
            return Err(ConfigError::InvalidMaxCapacity(config.cache.max_capacity));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

/// Nearest directory at or above `start` that holds `.readthrough/`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Project root a config file belongs to.
///
/// A file inside `.readthrough/` belongs to the directory above it; any other
/// file belongs to the directory it sits in.
pub fn project_root_for(config_file: &Path) -> PathBuf {
    let parent = match config_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if parent.file_name().is_some_and(|name| name == CONFIG_DIR) {
        parent.parent().map_or_else(|| parent.to_path_buf(), Path::to_path_buf)
    } else {
        parent.to_path_buf()
    }
}

fn anchor_paths(config: &mut Config, root: &Path) {
    let database = Path::new(&config.database.path);
    if !config.database.path.starts_with("sqlite:") && database.is_relative() {
        config.database.path = root.join(database).to_string_lossy().into_owned();
    }

    if let Some(log_dir) = config.logging.log_dir.as_mut() {
        if log_dir.is_relative() {
            *log_dir = root.join(&*log_dir);
        }
    }
}
