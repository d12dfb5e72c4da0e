//! Implementation of the `readthrough init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::adapters::memory::sample_entities;
use crate::adapters::sqlite::{initialize_database, SqliteEntityStore};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, DatabaseConfig};
use crate::infrastructure::config::{project_root_for, CONFIG_DIR};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long, short)]
    pub force: bool,

    /// Insert the sample users (ids 1 and 2) into the store
    #[arg(long)]
    pub seed: bool,

    /// Target directory (defaults to current directory; ignored with --config)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub config_path: PathBuf,
    pub database_path: PathBuf,
    pub seeded: usize,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        lines.push(format!("\nConfig:   {}", self.config_path.display()));
        lines.push(format!("Database: {}", self.database_path.display()));
        if self.seeded > 0 {
            lines.push(format!("\nSeeded {} sample entit{}", self.seeded, if self.seeded == 1 { "y" } else { "ies" }));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir().context("Failed to get current directory")?.join(path))
    }
}

/// Where `init` writes the config file and the database.
///
/// With `--config` the file goes where it points and the database lands in
/// `.readthrough/` under that file's project root, which is also where the
/// loader anchors the relative `database.path` written into it.
pub fn init_locations(args: &InitArgs, config_file: Option<&Path>) -> Result<(PathBuf, PathBuf)> {
    match config_file {
        Some(file) => {
            let file = absolute(file)?;
            let root = project_root_for(&file);
            Ok((file, root.join(CONFIG_DIR).join("readthrough.db")))
        }
        None => {
            let config_dir = absolute(&args.path)?.join(CONFIG_DIR);
            Ok((config_dir.join("config.yaml"), config_dir.join("readthrough.db")))
        }
    }
}

pub async fn execute(args: InitArgs, config_file: Option<&Path>, json_mode: bool) -> Result<()> {
    let (config_path, database_path) = init_locations(&args, config_file)?;

    for dir in [config_path.parent(), database_path.parent()].into_iter().flatten() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let wrote_config = if config_path.exists() && !args.force {
        false
    } else {
        let config = Config {
            database: DatabaseConfig {
                path: format!("{CONFIG_DIR}/readthrough.db"),
                ..DatabaseConfig::default()
            },
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize default config")?;
        fs::write(&config_path, yaml)
            .await
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        true
    };

    let pool = initialize_database(&format!("sqlite:{}", database_path.display()), None)
        .await
        .context("Failed to initialize database")?;

    let mut seeded = 0;
    if args.seed {
        let store = SqliteEntityStore::new(pool.clone());
        for entity in sample_entities() {
            store.upsert(&entity).await?;
            seeded += 1;
        }
    }
    pool.close().await;

    let message = if wrote_config {
        "Initialized readthrough project.".to_string()
    } else {
        "Configuration already present; database is up to date. Use --force to rewrite config.".to_string()
    };

    let output_data = InitOutput {
        success: true,
        message,
        config_path,
        database_path,
        seeded,
    };
    output(&output_data, json_mode);
    Ok(())
}
