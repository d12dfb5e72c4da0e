//! Command-line interface for readthrough.

pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

use crate::adapters::sqlite::{initialize_database, PoolConfig};
use crate::domain::errors::ResolveError;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "readthrough")]
#[command(about = "Resolve entities through a cache in front of an authoritative store", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file to use instead of .readthrough/config.yaml (init writes it here)
    #[arg(short, long, global = true, env = "READTHROUGH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration and database
    Init(commands::init::InitArgs),
    /// Insert or replace an entity in the store
    Put(commands::put::PutArgs),
    /// Resolve an entity through the cache
    Get(commands::get::GetArgs),
}

/// Load configuration from `--config` or the project directory.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Open and migrate the configured database.
pub async fn open_database(config: &Config) -> Result<SqlitePool> {
    initialize_database(&config.database.url(), Some(PoolConfig::from(&config.database)))
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))
}

/// Process exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ResolveError>() {
        Some(ResolveError::InvalidArgument(_)) => 2,
        Some(ResolveError::NotFound(_)) => 3,
        Some(ResolveError::StoreFailure(_)) => 4,
        None => 1,
    }
}

/// Report `err` and exit the process.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "success": false, "error": format!("{err:#}") });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(exit_code(&err))
}
