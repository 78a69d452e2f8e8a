//! CLI definitions.

pub mod commands;

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use journal_core::types::{ImageType, SessionType, TradeFilter};
use journal_stats::ReportKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "journal")]
#[command(author, version, about = "Trading journal performance statistics")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a statistics report over the journal
    Stats(StatsArgs),
    /// List journal trades, newest first
    Trades(TradesArgs),
    /// Store a screenshot for a trade
    AttachImage(AttachImageArgs),
    /// Remove a stored trade screenshot
    DetachImage(DetachImageArgs),
    /// Validate configuration
    ValidateConfig,
}

/// Filters shared by commands that read the journal.
#[derive(clap::Args)]
pub struct FilterArgs {
    /// Journal file (CSV); defaults to the configured path
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Only trades on or after this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Only trades on or before this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,

    /// Instrument symbol
    #[arg(short, long)]
    pub instrument: Option<String>,

    /// Setup label
    #[arg(short, long)]
    pub setup: Option<String>,

    /// Session (Asia, London, NY, Overlap)
    #[arg(long)]
    pub session: Option<SessionType>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> Result<TradeFilter> {
        let mut filter = TradeFilter::new();
        if let Some(from) = &self.from {
            filter = filter.since(parse_bound(from, NaiveTime::MIN)?);
        }
        if let Some(to) = &self.to {
            filter = filter.until(parse_bound(to, end_of_day())?);
        }
        if let Some(instrument) = &self.instrument {
            filter = filter.with_instrument(instrument.clone());
        }
        if let Some(setup) = &self.setup {
            filter = filter.with_setup(setup.clone());
        }
        if let Some(session) = self.session {
            filter = filter.with_session(session);
        }
        Ok(filter)
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Plain dates expand to `time` on that day; anything else goes through the
/// journal's timestamp parser.
fn parse_bound(value: &str, time: NaiveTime) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(time).and_utc());
    }
    journal_data::parse_timestamp(value).map_err(|e| anyhow!("Invalid date '{}': {}", value, e))
}

#[derive(clap::Args)]
pub struct StatsArgs {
    /// Report to compute
    #[arg(default_value = "all")]
    pub report: ReportKind,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Days covered by the daily report (1-365)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=365))]
    pub days: Option<u16>,

    /// Weeks covered by the weekly report (1-52)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=52))]
    pub weeks: Option<u8>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct TradesArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of trades to list
    #[arg(long, default_value = "50")]
    pub limit: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct AttachImageArgs {
    /// Trade id
    pub trade_id: u64,

    /// Image file to store
    pub file: PathBuf,

    /// Image type (before, during, after, analysis)
    #[arg(long, default_value = "analysis")]
    pub image_type: ImageType,

    /// Caption
    #[arg(long)]
    pub caption: Option<String>,

    /// Journal file (CSV); defaults to the configured path
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct DetachImageArgs {
    /// Stored image path, as printed by attach-image
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stats_args() {
        let cli = Cli::parse_from([
            "journal", "stats", "by-setup", "--days", "7", "--session", "ny", "--to", "2024-01-31",
        ]);
        let Commands::Stats(args) = cli.command else {
            panic!("expected stats command");
        };
        assert_eq!(args.report, ReportKind::BySetup);
        assert_eq!(args.days, Some(7));

        let filter = args.filter.to_filter().unwrap();
        assert_eq!(filter.session, Some(SessionType::NewYork));
        assert_eq!(
            filter.date_to.unwrap().to_rfc3339(),
            "2024-01-31T23:59:59.999+00:00"
        );
    }

    #[test]
    fn test_days_out_of_range() {
        assert!(Cli::try_parse_from(["journal", "stats", "daily", "--days", "400"]).is_err());
        assert!(Cli::try_parse_from(["journal", "stats", "weekly", "--weeks", "0"]).is_err());
    }

    #[test]
    fn test_detach_image_args() {
        let cli = Cli::parse_from(["journal", "detach-image", "data/images/trades/3/a.png"]);
        let Commands::DetachImage(args) = cli.command else {
            panic!("expected detach-image command");
        };
        assert_eq!(args.image_url, "data/images/trades/3/a.png");
    }

    #[test]
    fn test_unknown_report() {
        assert!(Cli::try_parse_from(["journal", "stats", "sharpe"]).is_err());
    }
}
