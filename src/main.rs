//! readthrough CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use readthrough::cli::commands::{get, init, put};
use readthrough::cli::{handle_error, load_config, Cli, Commands};
use readthrough::domain::models::Config;
use readthrough::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let Cli { command, json, config } = Cli::parse();

    let result = match command {
        Commands::Init(args) => init::execute(args, config.as_deref(), json).await,
        Commands::Put(args) => match bootstrap(config.as_deref()) {
            Ok((config, _logger)) => put::execute(args, &config, json).await,
            Err(err) => Err(err),
        },
        Commands::Get(args) => match bootstrap(config.as_deref()) {
            Ok((config, _logger)) => get::execute(args, &config, json).await,
            Err(err) => Err(err),
        },
    };

    if let Err(err) = result {
        handle_error(err, json);
    }
}

/// Load configuration and install the subscriber it describes.
fn bootstrap(config_path: Option<&Path>) -> Result<(Config, LoggerImpl)> {
    let config = load_config(config_path)?;
    let logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;
    Ok((config, logger))
}
