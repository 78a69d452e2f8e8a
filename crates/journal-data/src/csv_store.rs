//! CSV-backed trade journal.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use journal_core::error::DataError;
use journal_core::traits::TradeStore;
use journal_core::types::{Trade, TradeDraft, TradeFilter};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "ID", alias = "Id", default)]
    id: Option<u64>,
    #[serde(alias = "Date", alias = "open_time", alias = "timestamp")]
    date: String,
    #[serde(alias = "Instrument", alias = "symbol", alias = "Symbol")]
    instrument: String,
    #[serde(alias = "Session")]
    session: String,
    #[serde(alias = "Setup")]
    setup: String,
    #[serde(alias = "Direction", alias = "side")]
    direction: String,
    #[serde(alias = "Timeframe", alias = "tf")]
    timeframe: String,
    #[serde(alias = "Entry")]
    entry: String,
    #[serde(alias = "Stop Loss", alias = "sl")]
    stop_loss: String,
    #[serde(alias = "Take Profit", alias = "tp", default)]
    take_profit: Option<String>,
    #[serde(alias = "Risk %")]
    risk_pct: String,
    #[serde(alias = "Risk $")]
    risk_usd: String,
    #[serde(alias = "RR Expected", alias = "rr")]
    rr_expected: String,
    #[serde(alias = "Result R", alias = "r", default)]
    result_r: Option<String>,
    #[serde(alias = "PnL", alias = "pnl", default)]
    pnl_usd: Option<String>,
    #[serde(alias = "Duration", default)]
    duration_min: Option<u32>,
    #[serde(alias = "Respected Plan", default)]
    respected_plan: Option<String>,
    #[serde(alias = "Error", default)]
    error: Option<String>,
    #[serde(alias = "Error Type", default)]
    error_type: Option<String>,
    #[serde(alias = "Mental State", alias = "mental", default)]
    mental_state: Option<u8>,
    #[serde(alias = "Notes", default)]
    notes: Option<String>,
}

/// Trade journal stored as a CSV file with a header row.
///
/// The file is read on every query, so each call sees a fresh snapshot.
pub struct CsvTradeStore {
    path: PathBuf,
}

impl CsvTradeStore {
    /// Create a store over an existing journal file.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        if !path.exists() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self { path })
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate every trade in the file, in file order.
    pub async fn load_all(&self) -> Result<Vec<Trade>, DataError> {
        let trades = load_from_path(&self.path)?;
        info!(path = %self.path.display(), trades = trades.len(), "Loaded journal");
        Ok(trades)
    }
}

#[async_trait]
impl TradeStore for CsvTradeStore {
    async fn list_trades(&self, filter: &TradeFilter, limit: usize) -> Result<Vec<Trade>, DataError> {
        let mut trades: Vec<Trade> = self
            .load_all()
            .await?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();

        trades.sort_by(|a, b| b.date.cmp(&a.date));
        trades.truncate(limit);

        debug!(matched = trades.len(), limit, "Listed trades");
        Ok(trades)
    }

    async fn get_trade(&self, id: u64) -> Result<Option<Trade>, DataError> {
        Ok(self.load_all().await?.into_iter().find(|t| t.id == id))
    }

    async fn count_trades(&self, filter: &TradeFilter) -> Result<usize, DataError> {
        Ok(self
            .load_all()
            .await?
            .iter()
            .filter(|t| filter.matches(t))
            .count())
    }
}

fn load_from_path(path: &Path) -> Result<Vec<Trade>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError {
            line: 0,
            message: e.to_string(),
        })?;

    let mut trades = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        // Header is line 1.
        let line = index as u64 + 2;
        let record: CsvRecord = result.map_err(|e| DataError::ParseError {
            line,
            message: e.to_string(),
        })?;

        let draft = to_draft(record, index as u64 + 1, line)?;
        let trade = draft
            .validate()
            .map_err(|source| DataError::InvalidRow { line, source })?;
        trades.push(trade);
    }

    Ok(trades)
}

fn to_draft(record: CsvRecord, fallback_id: u64, line: u64) -> Result<TradeDraft, DataError> {
    Ok(TradeDraft {
        id: record.id.unwrap_or(fallback_id),
        date: parse_timestamp(&record.date).map_err(|message| DataError::ParseError { line, message })?,
        instrument: record.instrument,
        session: record.session,
        setup: record.setup,
        direction: record.direction,
        timeframe: record.timeframe,
        entry: parse_decimal("entry", &record.entry, line)?,
        stop_loss: parse_decimal("stop_loss", &record.stop_loss, line)?,
        take_profit: parse_optional_decimal("take_profit", record.take_profit, line)?,
        risk_pct: parse_decimal("risk_pct", &record.risk_pct, line)?,
        risk_usd: parse_decimal("risk_usd", &record.risk_usd, line)?,
        rr_expected: parse_decimal("rr_expected", &record.rr_expected, line)?,
        result_r: parse_optional_decimal("result_r", record.result_r, line)?,
        pnl_usd: parse_optional_decimal("pnl_usd", record.pnl_usd, line)?,
        duration_min: record.duration_min,
        respected_plan: parse_flag("respected_plan", record.respected_plan, true, line)?,
        error: parse_flag("error", record.error, false, line)?,
        error_type: record.error_type.filter(|s| !s.is_empty()),
        mental_state: record.mental_state,
        notes: record.notes,
    })
}

fn parse_decimal(field: &str, value: &str, line: u64) -> Result<Decimal, DataError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|e| DataError::ParseError {
            line,
            message: format!("{}: {} ({})", field, value, e),
        })
}

fn parse_optional_decimal(field: &str, value: Option<String>, line: u64) -> Result<Option<Decimal>, DataError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_decimal(field, v, line).map(Some),
    }
}

fn parse_flag(field: &str, value: Option<String>, default: bool, line: u64) -> Result<bool, DataError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(DataError::ParseError {
            line,
            message: format!("{}: not a boolean: {}", field, other),
        }),
    }
}

/// Parse the timestamp formats journals are commonly exported with.
pub fn parse_timestamp(date_str: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc());
            }
        }
    }

    // Unix timestamp, milliseconds when longer than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        let parsed = if ts > 10_000_000_000 {
            DateTime::from_timestamp_millis(ts)
        } else {
            DateTime::from_timestamp(ts, 0)
        };
        if let Some(dt) = parsed {
            return Ok(dt);
        }
    }

    Err(format!("Could not parse date: {}", date_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use journal_core::types::{ErrorType, SessionType};
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,date,instrument,session,setup,direction,timeframe,entry,stop_loss,take_profit,risk_pct,risk_usd,rr_expected,result_r,pnl_usd,duration_min,respected_plan,error,error_type,mental_state,notes";

    fn journal_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn sample() -> NamedTempFile {
        journal_file(&[
            "1,2024-01-02 09:30,XAUUSD,London,CRT,Buy,M15,2050,2045,2060,1,100,2,2,200,45,true,false,,4,clean",
            "2,2024-01-03 14:00,EURUSD,NY,BOS,Sell,M5,1.1,1.101,,0.5,50,3,-1,-50,20,false,true,FOMO,2,",
            "3,2024-01-05 03:15,XAUUSD,Asia,CRT,Sell,H1,2040,2050,,1,100,1.5,,,,true,false,,,",
        ])
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15 10:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15 10:30").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-01-15T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("1705314600").unwrap(), expected);
        assert_eq!(parse_timestamp("1705314600000").unwrap(), expected);
        assert!(parse_timestamp("2024-01-15").is_ok());
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[tokio::test]
    async fn test_load_all() {
        let file = sample();
        let store = CsvTradeStore::new(file.path()).unwrap();
        let trades = store.load_all().await.unwrap();

        assert_eq!(trades.len(), 3);
        assert_eq!(trades[0].result_r, Some(dec!(2)));
        assert_eq!(trades[0].take_profit, Some(dec!(2060)));
        assert_eq!(trades[1].session, SessionType::NewYork);
        assert_eq!(trades[1].error_type, ErrorType::Fomo);
        assert!(!trades[1].respected_plan);
        assert_eq!(trades[2].result_r, None);
        assert_eq!(trades[2].mental_state, None);
        assert_eq!(trades[2].notes, None);
    }

    #[tokio::test]
    async fn test_list_trades_filters_and_orders() {
        let file = sample();
        let store = CsvTradeStore::new(file.path()).unwrap();

        let all = store.list_trades(&TradeFilter::new(), 100).await.unwrap();
        let ids: Vec<u64> = all.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let gold = TradeFilter::new().with_instrument("XAUUSD");
        assert_eq!(store.count_trades(&gold).await.unwrap(), 2);

        let crt_early = TradeFilter::new()
            .with_setup("CRT")
            .until(Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap());
        let trades = store.list_trades(&crt_early, 100).await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, 1);

        let limited = store.list_trades(&TradeFilter::new(), 1).await.unwrap();
        assert_eq!(limited[0].id, 3);
    }

    #[tokio::test]
    async fn test_get_trade() {
        let file = sample();
        let store = CsvTradeStore::new(file.path()).unwrap();
        assert_eq!(store.get_trade(2).await.unwrap().unwrap().setup, "BOS");
        assert!(store.get_trade(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_row_reports_line() {
        let file = journal_file(&[
            "1,2024-01-02 09:30,XAUUSD,London,CRT,Buy,M15,2050,2045,,1,100,2,1,100,,true,false,,,",
            "2,2024-01-03 09:30,XAUUSD,Tokyo,CRT,Buy,M15,2050,2045,,1,100,2,1,100,,true,false,,,",
        ]);
        let store = CsvTradeStore::new(file.path()).unwrap();
        match store.load_all().await {
            Err(DataError::InvalidRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected invalid row, got {:?}", other.map(|t| t.len())),
        }

        let file = journal_file(&[
            "1,not-a-date,XAUUSD,London,CRT,Buy,M15,2050,2045,,1,100,2,1,100,,true,false,,,",
        ]);
        let store = CsvTradeStore::new(file.path()).unwrap();
        assert!(matches!(
            store.load_all().await,
            Err(DataError::ParseError { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvTradeStore::new("/nonexistent/journal.csv"),
            Err(DataError::NotFound(_))
        ));
    }
}
