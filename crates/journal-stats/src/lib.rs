//! Performance statistics over journal trades.
//!
//! [`StatisticsEngine`] takes a filtered snapshot of trades and derives
//! winrate, expectancy, profit factor, drawdown, per-group and per-period
//! breakdowns, and the equity curve. Reports are plain serializable values.

mod engine;
mod report;
mod statistics;

pub use engine::StatisticsEngine;
pub use report::{JournalReport, ReportKind};
pub use statistics::{
    DailyStats, EquityPoint, ErrorStats, GlobalStats, MentalStateStats, SessionStats, SetupStats,
    WeeklyStats, PROFIT_FACTOR_CAP,
};
