//! Journal trade record and its categorical labels.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "Buy"),
            Direction::Sell => write!(f, "Sell"),
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "long" => Ok(Direction::Buy),
            "sell" | "short" => Ok(Direction::Sell),
            _ => Err(ValidationError::UnknownLabel {
                kind: "direction",
                label: s.to_string(),
            }),
        }
    }
}

/// Trading session the trade was opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SessionType {
    Asia,
    London,
    #[serde(rename = "NY")]
    NewYork,
    Overlap,
}

impl SessionType {
    /// All sessions, in display order.
    pub fn all() -> &'static [SessionType] {
        &[
            SessionType::Asia,
            SessionType::London,
            SessionType::NewYork,
            SessionType::Overlap,
        ]
    }

    /// Label used in journals and reports.
    pub fn label(&self) -> &'static str {
        match self {
            SessionType::Asia => "Asia",
            SessionType::London => "London",
            SessionType::NewYork => "NY",
            SessionType::Overlap => "Overlap",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SessionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asia" => Ok(SessionType::Asia),
            "london" => Ok(SessionType::London),
            "ny" | "new york" | "newyork" => Ok(SessionType::NewYork),
            "overlap" => Ok(SessionType::Overlap),
            _ => Err(ValidationError::UnknownLabel {
                kind: "session",
                label: s.to_string(),
            }),
        }
    }
}

/// Execution mistake attached to a trade.
///
/// `None` is the sentinel for trades without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ErrorType {
    #[default]
    None,
    #[serde(rename = "FOMO")]
    Fomo,
    Revenge,
    Oversize,
    #[serde(rename = "No SL")]
    NoStopLoss,
    #[serde(rename = "Early Exit")]
    EarlyExit,
    #[serde(rename = "Late Entry")]
    LateEntry,
    #[serde(rename = "Wrong Setup")]
    WrongSetup,
    #[serde(rename = "News Ignored")]
    NewsIgnored,
    Overtrading,
    Other,
}

impl ErrorType {
    /// Label used in journals and reports.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorType::None => "None",
            ErrorType::Fomo => "FOMO",
            ErrorType::Revenge => "Revenge",
            ErrorType::Oversize => "Oversize",
            ErrorType::NoStopLoss => "No SL",
            ErrorType::EarlyExit => "Early Exit",
            ErrorType::LateEntry => "Late Entry",
            ErrorType::WrongSetup => "Wrong Setup",
            ErrorType::NewsIgnored => "News Ignored",
            ErrorType::Overtrading => "Overtrading",
            ErrorType::Other => "Other",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ErrorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "" | "none" => Ok(ErrorType::None),
            "fomo" => Ok(ErrorType::Fomo),
            "revenge" => Ok(ErrorType::Revenge),
            "oversize" => Ok(ErrorType::Oversize),
            "nosl" | "nostoploss" => Ok(ErrorType::NoStopLoss),
            "earlyexit" => Ok(ErrorType::EarlyExit),
            "lateentry" => Ok(ErrorType::LateEntry),
            "wrongsetup" => Ok(ErrorType::WrongSetup),
            "newsignored" => Ok(ErrorType::NewsIgnored),
            "overtrading" => Ok(ErrorType::Overtrading),
            "other" => Ok(ErrorType::Other),
            _ => Err(ValidationError::UnknownLabel {
                kind: "error type",
                label: s.to_string(),
            }),
        }
    }
}

/// A validated journal entry.
///
/// Built through [`crate::TradeDraft::validate`]; the invariants checked there
/// (positive prices, `error_type == None` unless `error`, mental state in
/// 1..=5) hold for every value of this type produced by the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: u64,
    /// Open time
    pub date: DateTime<Utc>,
    pub instrument: String,
    pub session: SessionType,
    pub setup: String,
    pub direction: Direction,
    pub timeframe: String,

    pub entry: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Option<Decimal>,

    /// Percent of capital risked
    pub risk_pct: Decimal,
    pub risk_usd: Decimal,
    /// Planned reward/risk
    pub rr_expected: Decimal,

    /// Outcome in R multiples; `None` while the trade is open
    pub result_r: Option<Decimal>,
    pub pnl_usd: Option<Decimal>,
    pub duration_min: Option<u32>,

    pub respected_plan: bool,
    pub error: bool,
    pub error_type: ErrorType,
    /// Self-assessed state from 1 (poor) to 5 (excellent)
    pub mental_state: Option<u8>,

    pub notes: Option<String>,
}

impl Trade {
    /// Check if the trade is closed.
    pub fn is_completed(&self) -> bool {
        self.result_r.is_some()
    }

    /// Check if the trade closed in profit.
    pub fn is_winner(&self) -> bool {
        matches!(self.result_r, Some(r) if r > Decimal::ZERO)
    }

    /// Check if the trade closed at a loss.
    pub fn is_loser(&self) -> bool {
        matches!(self.result_r, Some(r) if r < Decimal::ZERO)
    }

    /// Check if the trade closed flat.
    pub fn is_breakeven(&self) -> bool {
        matches!(self.result_r, Some(r) if r.is_zero())
    }

    /// P&L with an absent value counted as zero.
    pub fn pnl_or_zero(&self) -> Decimal {
        self.pnl_usd.unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_parse() {
        assert_eq!(SessionType::from_str("NY").unwrap(), SessionType::NewYork);
        assert_eq!(SessionType::from_str("london").unwrap(), SessionType::London);
        assert!(SessionType::from_str("Sydney").is_err());
    }

    #[test]
    fn test_error_type_parse() {
        assert_eq!(ErrorType::from_str("No SL").unwrap(), ErrorType::NoStopLoss);
        assert_eq!(ErrorType::from_str("early_exit").unwrap(), ErrorType::EarlyExit);
        assert_eq!(ErrorType::from_str("FOMO").unwrap(), ErrorType::Fomo);
        assert_eq!(ErrorType::from_str("").unwrap(), ErrorType::None);
        assert!(ErrorType::from_str("Boredom").is_err());
    }

    #[test]
    fn test_labels_serialize() {
        assert_eq!(serde_json::to_string(&SessionType::NewYork).unwrap(), "\"NY\"");
        assert_eq!(
            serde_json::to_string(&ErrorType::NewsIgnored).unwrap(),
            "\"News Ignored\""
        );
        for error_type in [ErrorType::NoStopLoss, ErrorType::Fomo, ErrorType::Other] {
            let json = serde_json::to_string(&error_type).unwrap();
            assert_eq!(json, format!("\"{}\"", error_type.label()));
        }
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Buy.to_string(), "Buy");
        assert_eq!(Direction::from_str("short").unwrap(), Direction::Sell);
    }
}
