//! CLI command implementations.

pub mod attach_image;
pub mod detach_image;
pub mod stats;
pub mod trades;
pub mod validate;

use anyhow::{Context, Result};
use journal_config::AppConfig;
use journal_data::CsvTradeStore;
use std::path::PathBuf;

/// Open the journal named on the command line, or the configured one.
pub(crate) fn open_journal(data: Option<PathBuf>, config: &AppConfig) -> Result<CsvTradeStore> {
    let path = data.unwrap_or_else(|| config.data.journal_path.clone());
    CsvTradeStore::new(&path).with_context(|| {
        format!(
            "Journal '{}' not found. Provide a CSV file with --data or set data.journal_path",
            path.display()
        )
    })
}
