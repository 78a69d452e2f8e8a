//! Validate configuration command.

use anyhow::Result;
use journal_config::{to_toml, AppConfig};
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, using defaults and environment overrides");
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Journal: {}", config.data.journal_path.display());
    println!("Image directory: {}", config.storage.image_dir.display());
    println!("Max image size: {} bytes", config.storage.max_image_bytes);
    println!(
        "Default periods: {} days, {} weeks",
        config.stats.default_days, config.stats.default_weeks
    );
    println!();
    println!("{}", to_toml(config)?);

    Ok(())
}
