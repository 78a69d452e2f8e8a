//! Unvalidated trade input and the boundary checks that turn it into a [`Trade`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{Direction, ErrorType, SessionType, Trade};
use crate::error::ValidationError;

const MAX_INSTRUMENT_LEN: usize = 20;
const MAX_SETUP_LEN: usize = 50;
const MAX_TIMEFRAME_LEN: usize = 10;

/// Raw trade as supplied by a journal file or form.
///
/// Labels are kept as strings until [`TradeDraft::validate`] parses them into
/// their closed enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeDraft {
    pub id: u64,
    pub date: DateTime<Utc>,
    pub instrument: String,
    pub session: String,
    pub setup: String,
    pub direction: String,
    pub timeframe: String,
    pub entry: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Option<Decimal>,
    pub risk_pct: Decimal,
    pub risk_usd: Decimal,
    pub rr_expected: Decimal,
    pub result_r: Option<Decimal>,
    pub pnl_usd: Option<Decimal>,
    pub duration_min: Option<u32>,
    pub respected_plan: bool,
    pub error: bool,
    pub error_type: Option<String>,
    pub mental_state: Option<u8>,
    pub notes: Option<String>,
}

impl TradeDraft {
    /// Validate the draft and build a [`Trade`].
    ///
    /// A draft without `error` set always yields `ErrorType::None`, whatever
    /// label it carried.
    pub fn validate(self) -> Result<Trade, ValidationError> {
        let instrument = check_label("instrument", self.instrument, MAX_INSTRUMENT_LEN)?;
        let setup = check_label("setup", self.setup, MAX_SETUP_LEN)?;
        let timeframe = check_label("timeframe", self.timeframe, MAX_TIMEFRAME_LEN)?;

        let session: SessionType = self.session.parse()?;
        let direction: Direction = self.direction.parse()?;

        check_positive("entry", self.entry)?;
        check_positive("stop_loss", self.stop_loss)?;
        if let Some(take_profit) = self.take_profit {
            check_positive("take_profit", take_profit)?;
        }
        check_positive("risk_pct", self.risk_pct)?;
        if self.risk_pct > dec!(100) {
            return Err(ValidationError::OutOfRange {
                field: "risk_pct",
                value: self.risk_pct.to_string(),
            });
        }
        check_positive("risk_usd", self.risk_usd)?;
        check_positive("rr_expected", self.rr_expected)?;

        if let Some(state) = self.mental_state {
            if !(1..=5).contains(&state) {
                return Err(ValidationError::OutOfRange {
                    field: "mental_state",
                    value: state.to_string(),
                });
            }
        }

        let error_type = if self.error {
            match self.error_type.as_deref() {
                Some(label) => label.parse()?,
                None => ErrorType::None,
            }
        } else {
            ErrorType::None
        };

        let notes = self.notes.filter(|n| !n.trim().is_empty());

        Ok(Trade {
            id: self.id,
            date: self.date,
            instrument,
            session,
            setup,
            direction,
            timeframe,
            entry: self.entry,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            risk_pct: self.risk_pct,
            risk_usd: self.risk_usd,
            rr_expected: self.rr_expected,
            result_r: self.result_r,
            pnl_usd: self.pnl_usd,
            duration_min: self.duration_min,
            respected_plan: self.respected_plan,
            error: self.error,
            error_type,
            mental_state: self.mental_state,
            notes,
        })
    }
}

fn check_label(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(value)
}

fn check_positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> TradeDraft {
        TradeDraft {
            id: 1,
            date: Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap(),
            instrument: "XAUUSD".to_string(),
            session: "London".to_string(),
            setup: "CRT".to_string(),
            direction: "Buy".to_string(),
            timeframe: "M15".to_string(),
            entry: dec!(2150.5),
            stop_loss: dec!(2145.0),
            take_profit: Some(dec!(2161.5)),
            risk_pct: dec!(1),
            risk_usd: dec!(100),
            rr_expected: dec!(2),
            result_r: Some(dec!(2)),
            pnl_usd: Some(dec!(200)),
            duration_min: Some(45),
            respected_plan: true,
            error: false,
            error_type: None,
            mental_state: Some(4),
            notes: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        let trade = draft().validate().unwrap();
        assert_eq!(trade.session, SessionType::London);
        assert_eq!(trade.direction, Direction::Buy);
        assert!(trade.is_winner());
        assert!(!trade.is_loser());
    }

    #[test]
    fn test_error_type_forced_to_none_without_error() {
        let mut d = draft();
        d.error = false;
        d.error_type = Some("FOMO".to_string());
        assert_eq!(d.validate().unwrap().error_type, ErrorType::None);

        let mut d = draft();
        d.error = true;
        d.error_type = Some("FOMO".to_string());
        assert_eq!(d.validate().unwrap().error_type, ErrorType::Fomo);
    }

    #[test]
    fn test_mental_state_range() {
        for bad in [0u8, 6] {
            let mut d = draft();
            d.mental_state = Some(bad);
            assert!(matches!(
                d.validate(),
                Err(ValidationError::OutOfRange { field: "mental_state", .. })
            ));
        }
    }

    #[test]
    fn test_rejects_unknown_session() {
        let mut d = draft();
        d.session = "Sydney".to_string();
        assert!(matches!(
            d.validate(),
            Err(ValidationError::UnknownLabel { kind: "session", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_numbers_and_labels() {
        let mut d = draft();
        d.entry = Decimal::ZERO;
        assert_eq!(
            d.validate(),
            Err(ValidationError::NotPositive { field: "entry" })
        );

        let mut d = draft();
        d.risk_pct = dec!(150);
        assert!(d.validate().is_err());

        let mut d = draft();
        d.instrument = "   ".to_string();
        assert_eq!(
            d.validate(),
            Err(ValidationError::Empty { field: "instrument" })
        );

        let mut d = draft();
        d.setup = "x".repeat(51);
        assert!(matches!(d.validate(), Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn test_open_trade_is_unclassified() {
        let mut d = draft();
        d.result_r = None;
        let trade = d.validate().unwrap();
        assert!(!trade.is_completed());
        assert!(!trade.is_winner() && !trade.is_loser() && !trade.is_breakeven());
    }
}
