//! Logging for the trading journal.

mod logging;

pub use logging::setup_logging;
