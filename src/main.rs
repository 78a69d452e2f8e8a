//! Trading journal CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use journal_config::{load_config, AppConfig};
use journal_data::LocalImageStore;
use journal_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json_logs = cli.json_logs || config.logging.is_json();
    let _guard = setup_logging(&log_level, json_logs, config.logging.file.as_deref());

    // Execute command
    match cli.command {
        Commands::Stats(args) => cli::commands::stats::run(args, &config).await,
        Commands::Trades(args) => cli::commands::trades::run(args, &config).await,
        Commands::AttachImage(args) => {
            let images = image_store(&config);
            cli::commands::attach_image::run(args, &config, &images).await
        }
        Commands::DetachImage(args) => {
            let images = image_store(&config);
            cli::commands::detach_image::run(args, &images).await
        }
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
    }
}

fn image_store(config: &AppConfig) -> LocalImageStore {
    LocalImageStore::new(&config.storage.image_dir).with_max_bytes(config.storage.max_image_bytes)
}
