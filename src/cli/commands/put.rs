//! Implementation of the `readthrough put` command.
//!
//! Writes go straight to the store. Cached copies are left alone and expire
//! on their own TTL.

use anyhow::{bail, Result};
use clap::Args;

use crate::adapters::sqlite::SqliteEntityStore;
use crate::cli::open_database;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Entity, EntityId};

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Entity identifier (numeric ids are stored as numbers)
    pub id: String,
    /// Display name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,
    /// Extra field (format: "key=value"; JSON values are parsed)
    #[arg(long)]
    pub attr: Vec<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct PutOutput {
    pub success: bool,
    pub message: String,
    pub entity: Entity,
}

impl CommandOutput for PutOutput {
    fn to_human(&self) -> String {
        self.message.clone()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Parse a `key=value` field; values that are valid JSON keep their type.
pub fn parse_attribute(raw: &str) -> Result<(String, serde_json::Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Invalid attribute '{raw}': expected key=value");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Invalid attribute '{raw}': key cannot be empty");
    }
    if key == "id" {
        bail!("Invalid attribute '{raw}': '{key}' is a reserved field");
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Assemble the stored entity: `--name`, `--email`, then `--attr` in order.
/// A later `--attr` wins over an earlier value for the same key.
pub fn build_entity(id: EntityId, args: &PutArgs) -> Result<Entity> {
    let mut entity = Entity::new(id);
    if let Some(name) = &args.name {
        entity = entity.with_field("name", name.as_str());
    }
    if let Some(email) = &args.email {
        entity = entity.with_field("email", email.as_str());
    }
    for raw in &args.attr {
        let (key, value) = parse_attribute(raw)?;
        entity = entity.with_field(key, value);
    }
    Ok(entity)
}

pub async fn execute(args: PutArgs, config: &Config, json_mode: bool) -> Result<()> {
    let id = EntityId::parse_str(&args.id);
    if id.is_blank() {
        bail!("Entity identifier is required");
    }

    let entity = build_entity(id, &args)?;

    let pool = open_database(config).await?;
    let store = SqliteEntityStore::new(pool.clone());
    store.upsert(&entity).await?;
    pool.close().await;

    let output_data = PutOutput {
        success: true,
        message: format!("Stored entity {}", entity.id),
        entity,
    };
    output(&output_data, json_mode);
    Ok(())
}
