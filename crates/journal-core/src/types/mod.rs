//! Core data types for the trading journal.

mod draft;
mod filter;
mod image;
mod trade;

pub use draft::TradeDraft;
pub use filter::TradeFilter;
pub use image::{ImageType, TradeImage};
pub use trade::{Direction, ErrorType, SessionType, Trade};
