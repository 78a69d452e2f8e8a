//! Core traits for the trading journal.

mod image_store;
mod trade_store;

pub use image_store::{ImageStore, ALLOWED_IMAGE_TYPES};
pub use trade_store::TradeStore;
