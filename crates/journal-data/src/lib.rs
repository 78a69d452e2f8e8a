//! Trade and image storage for the trading journal.

mod csv_store;
mod image_store;

pub use csv_store::{parse_timestamp, CsvTradeStore};
pub use image_store::{LocalImageStore, DEFAULT_MAX_IMAGE_BYTES};

use journal_core::error::DataError;
use journal_core::traits::TradeStore;
use journal_core::types::{Trade, TradeFilter};

/// Upper bound on trades pulled into a single statistics run.
pub const STATS_FETCH_LIMIT: usize = 10_000;

/// Fetch the trades a statistics run should cover.
pub async fn load_for_stats(
    store: &dyn TradeStore,
    filter: &TradeFilter,
) -> Result<Vec<Trade>, DataError> {
    store.list_trades(filter, STATS_FETCH_LIMIT).await
}
