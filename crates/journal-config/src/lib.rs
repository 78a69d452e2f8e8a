//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, DataSettings, LoggingConfig, StatsSettings, StorageSettings};

use config::{Config, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("stats.default_days must be within 1..=365, got {0}")]
    DaysOutOfRange(usize),

    #[error("stats.default_weeks must be within 1..=52, got {0}")]
    WeeksOutOfRange(usize),

    #[error("storage.max_image_bytes must be positive")]
    ZeroImageLimit,

    #[error("Could not render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Load configuration from file and environment.
///
/// Environment variables override the file, e.g.
/// `JOURNAL__STATS__DEFAULT_DAYS=60`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("JOURNAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    validate(&app)?;
    Ok(app)
}

/// Check value ranges the type system cannot express.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if !(1..=365).contains(&config.stats.default_days) {
        return Err(ConfigError::DaysOutOfRange(config.stats.default_days));
    }
    if !(1..=52).contains(&config.stats.default_weeks) {
        return Err(ConfigError::WeeksOutOfRange(config.stats.default_weeks));
    }
    if config.storage.max_image_bytes == 0 {
        return Err(ConfigError::ZeroImageLimit);
    }
    Ok(())
}

/// Render the effective configuration as TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}
