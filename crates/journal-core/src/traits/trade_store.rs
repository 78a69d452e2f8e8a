//! Trade store trait definition.

use crate::error::DataError;
use crate::types::{Trade, TradeFilter};
use async_trait::async_trait;

/// Trait for persistent trade storage.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// List trades matching a filter.
    ///
    /// # Arguments
    /// * `filter` - Predicates every returned trade satisfies
    /// * `limit` - Maximum number of trades to return
    ///
    /// # Returns
    /// Matching trades ordered from newest to oldest
    async fn list_trades(&self, filter: &TradeFilter, limit: usize) -> Result<Vec<Trade>, DataError>;

    /// Get a single trade by ID.
    async fn get_trade(&self, id: u64) -> Result<Option<Trade>, DataError>;

    /// Count trades matching a filter.
    async fn count_trades(&self, filter: &TradeFilter) -> Result<usize, DataError>;
}
