//! Implementation of the `readthrough get` command.

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use crate::application::build_resolver;
use crate::cli::open_database;
use crate::cli::output::{detail_table, output, CommandOutput};
use crate::domain::models::{CacheBackend, Config, Entity, EntityId};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Entity identifier
    pub id: String,
    /// Bypass the cache and read from the store only
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct GetOutput {
    pub success: bool,
    pub cache: &'static str,
    pub entity: Entity,
}

impl CommandOutput for GetOutput {
    fn to_human(&self) -> String {
        let mut rows = vec![("id", self.entity.id.to_string())];
        rows.extend(self.entity.fields.iter().map(|(key, value)| {
            let shown = value.as_str().map_or_else(|| value.to_string(), str::to_string);
            (key.as_str(), shown)
        }));
        detail_table(rows).to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: GetArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut cache_config = config.cache.clone();
    if args.no_cache {
        cache_config.backend = CacheBackend::None;
    }

    if cache_config.backend != CacheBackend::None && !cache_config.backend.is_persistent() {
        warn!(
            backend = cache_config.backend.as_str(),
            "cache backend does not persist between CLI runs; every get reads the store"
        );
    }

    let pool = open_database(config).await?;
    let resolver = build_resolver(&cache_config, &pool);

    let id = EntityId::parse_str(&args.id);
    let result = resolver.resolve(&id).await;
    pool.close().await;
    let entity = result?;

    info!(id = %entity.id, backend = cache_config.backend.as_str(), "resolved entity");

    let output_data = GetOutput {
        success: true,
        cache: cache_config.backend.as_str(),
        entity,
    };
    output(&output_data, json_mode);
    Ok(())
}
