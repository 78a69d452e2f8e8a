//! Trades command implementation.

use anyhow::Result;
use journal_config::AppConfig;
use journal_core::traits::TradeStore;

use super::open_journal;
use crate::cli::{OutputFormat, TradesArgs};

pub async fn run(args: TradesArgs, config: &AppConfig) -> Result<()> {
    let filter = args.filter.to_filter()?;
    let store = open_journal(args.filter.data, config)?;

    let total = store.count_trades(&filter).await?;
    let trades = store.list_trades(&filter, args.limit).await?;

    if args.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&trades)?);
        return Ok(());
    }

    println!(
        "{:>6}  {:<16}  {:<10}  {:<8}  {:<20}  {:<4}  {:>8}  {:>10}",
        "ID", "Date", "Instrument", "Session", "Setup", "Dir", "R", "P&L"
    );
    for trade in &trades {
        let result_r = trade
            .result_r
            .map(|r| r.to_string())
            .unwrap_or_else(|| "open".to_string());
        let pnl = trade.pnl_usd.map(|p| p.to_string()).unwrap_or_default();
        println!(
            "{:>6}  {:<16}  {:<10}  {:<8}  {:<20}  {:<4}  {:>8}  {:>10}",
            trade.id,
            trade.date.format("%Y-%m-%d %H:%M"),
            trade.instrument,
            trade.session.to_string(),
            trade.setup,
            trade.direction.to_string(),
            result_r,
            pnl
        );
    }
    println!();
    println!("Showing {} of {} trades", trades.len(), total);

    Ok(())
}
