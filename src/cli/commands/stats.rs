//! Stats command implementation.

use anyhow::{Context, Result};
use journal_config::AppConfig;
use journal_data::load_for_stats;
use journal_stats::StatisticsEngine;
use tracing::info;

use super::open_journal;
use crate::cli::{OutputFormat, StatsArgs};

pub async fn run(args: StatsArgs, config: &AppConfig) -> Result<()> {
    let filter = args.filter.to_filter()?;
    let store = open_journal(args.filter.data, config)?;

    let trades = load_for_stats(&store, &filter)
        .await
        .context("Failed to load trades")?;
    info!(trades = trades.len(), report = %args.report, "Computing statistics");

    let days = args.days.map_or(config.stats.default_days, usize::from);
    let weeks = args.weeks.map_or(config.stats.default_weeks, usize::from);

    let engine = StatisticsEngine::new(trades);
    let report = engine.full_report(days, weeks);

    // Output results
    match args.output {
        OutputFormat::Json => println!("{}", report.section_to_json(args.report)?),
        OutputFormat::Text => println!("{}", report.section_summary(args.report)),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        let json = report.section_to_json(args.report)?;
        tokio::fs::write(save_path, json)
            .await
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Report saved to {:?}", save_path);
    }

    Ok(())
}
