//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub stats: StatsSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "trading-journal".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Where the journal lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    pub journal_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            journal_path: PathBuf::from("data/journal.csv"),
        }
    }
}

/// Defaults for the period reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSettings {
    pub default_days: usize,
    pub default_weeks: usize,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            default_days: 30,
            default_weeks: 12,
        }
    }
}

/// Image storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub image_dir: PathBuf,
    pub max_image_bytes: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("data/images"),
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}
