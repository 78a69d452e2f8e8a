//! Report value types and the aggregates they are built from.

use chrono::{DateTime, NaiveDate, Utc};
use journal_core::types::{ErrorType, SessionType, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Profit factor reported when a set of trades has no losses.
pub const PROFIT_FACTOR_CAP: Decimal = dec!(999.99);

/// A completed trade paired with its known R result.
#[derive(Debug, Clone)]
pub(crate) struct ClosedTrade {
    pub result_r: Decimal,
    pub trade: Trade,
}

impl ClosedTrade {
    pub fn from_trade(trade: Trade) -> Option<Self> {
        if !trade.is_completed() {
            return None;
        }
        trade.result_r.map(|result_r| Self { result_r, trade })
    }
}

/// Aggregate performance figures across the whole selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    /// Winning trades, percent
    pub winrate: Decimal,
    pub avg_win_r: Decimal,
    /// Negative when there are losers
    pub avg_loss_r: Decimal,
    /// Expected R per trade
    pub expectancy: Decimal,
    pub profit_factor: Decimal,
    pub total_pnl_usd: Decimal,
    pub total_r: Decimal,
    pub max_drawdown_r: Decimal,
    pub max_drawdown_pct: Decimal,
    pub avg_rr_expected: Decimal,
    pub avg_rr_actual: Decimal,
    /// Trades that respected the plan, percent
    pub discipline_rate: Decimal,
    pub avg_duration_min: Decimal,
}

/// Performance of one setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupStats {
    pub setup: String,
    pub total_trades: usize,
    pub winrate: Decimal,
    pub expectancy: Decimal,
    pub total_r: Decimal,
    pub avg_rr: Decimal,
    pub profit_factor: Decimal,
}

/// Performance of one trading session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session: SessionType,
    pub total_trades: usize,
    pub winrate: Decimal,
    pub expectancy: Decimal,
    pub total_r: Decimal,
    pub avg_rr: Decimal,
}

/// Results of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_r: Decimal,
    pub pnl_usd: Decimal,
    pub winrate: Decimal,
}

/// Results of one Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_r: Decimal,
    pub pnl_usd: Decimal,
    pub winrate: Decimal,
    pub expectancy: Decimal,
}

/// Frequency and cost of one kind of mistake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    pub error_type: ErrorType,
    pub count: usize,
    /// Share of all error trades, percent
    pub percentage: Decimal,
    /// Mean R of the losing trades with this error
    pub avg_loss_r: Decimal,
}

/// Results at one self-assessed mental state level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalStateStats {
    pub mental_state: u8,
    pub total_trades: usize,
    pub winrate: Decimal,
    pub avg_result_r: Decimal,
}

/// One point of the cumulative equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    #[serde(with = "minute_format")]
    pub date: DateTime<Utc>,
    pub cumulative_r: Decimal,
    pub cumulative_pnl: Decimal,
    pub trade_count: usize,
}

/// `YYYY-MM-DD HH:MM` timestamps.
mod minute_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|dt| dt.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Win/loss tallies over a group of closed trades.
#[derive(Debug, Clone, Default)]
pub(crate) struct Outcomes {
    pub total: usize,
    pub winners: usize,
    pub losers: usize,
    pub breakevens: usize,
    /// Sum of positive results
    pub gross_profit: Decimal,
    /// Absolute sum of negative results
    pub gross_loss: Decimal,
    pub total_r: Decimal,
    pub total_pnl: Decimal,
}

impl Outcomes {
    pub fn tally<'a>(trades: impl IntoIterator<Item = &'a ClosedTrade>) -> Self {
        let mut outcomes = Self::default();
        for closed in trades {
            let r = closed.result_r;
            outcomes.total += 1;
            outcomes.total_r = outcomes.total_r.saturating_add(r);
            outcomes.total_pnl = outcomes.total_pnl.saturating_add(closed.trade.pnl_or_zero());

            if closed.trade.is_winner() {
                outcomes.winners += 1;
                outcomes.gross_profit = outcomes.gross_profit.saturating_add(r);
            } else if closed.trade.is_loser() {
                outcomes.losers += 1;
                outcomes.gross_loss = outcomes.gross_loss.saturating_add(r.abs());
            } else {
                outcomes.breakevens += 1;
            }
        }
        outcomes
    }

    pub fn winrate(&self) -> Decimal {
        percent(self.winners, self.total)
    }

    pub fn avg_win_r(&self) -> Decimal {
        ratio(self.gross_profit, self.winners)
    }

    pub fn avg_loss_r(&self) -> Decimal {
        if self.losers == 0 {
            return Decimal::ZERO;
        }
        -ratio(self.gross_loss, self.losers)
    }

    pub fn loss_rate(&self) -> Decimal {
        ratio(Decimal::from(self.losers), self.total)
    }

    /// (winrate × avg win) − (loss rate × |avg loss|)
    pub fn expectancy(&self) -> Decimal {
        self.winrate() / dec!(100) * self.avg_win_r() - self.loss_rate() * self.avg_loss_r().abs()
    }

    /// Gross profit over gross loss. [`PROFIT_FACTOR_CAP`] when nothing was
    /// lost or the ratio does not fit in a `Decimal`. Already rounded.
    pub fn profit_factor(&self) -> Decimal {
        if self.gross_loss <= Decimal::ZERO {
            return PROFIT_FACTOR_CAP;
        }
        self.gross_profit
            .checked_div(self.gross_loss)
            .map_or(PROFIT_FACTOR_CAP, round2)
    }

    /// Mean R per trade.
    pub fn avg_r(&self) -> Decimal {
        ratio(self.total_r, self.total)
    }
}

/// Largest peak-to-trough fall of cumulative R, in R and as a percent of
/// the highest peak reached.
///
/// Trades must already be in chronological order. The peak starts at zero,
/// so a losing start counts as drawdown from flat.
pub(crate) fn max_drawdown<'a>(trades: impl IntoIterator<Item = &'a ClosedTrade>) -> (Decimal, Decimal) {
    let mut cumulative = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut max_dd = Decimal::ZERO;

    for closed in trades {
        cumulative = cumulative.saturating_add(closed.result_r);
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = peak.saturating_sub(cumulative);
        if drawdown > max_dd {
            max_dd = drawdown;
        }
    }

    // Saturates when a tiny peak makes the ratio unrepresentable.
    let max_dd_pct = if peak > Decimal::ZERO {
        max_dd
            .checked_div(peak)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };

    (max_dd, max_dd_pct)
}

/// `part / whole × 100`, zero for an empty whole.
pub(crate) fn percent(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) * dec!(100) / Decimal::from(whole)
}

/// `sum / count`, zero for an empty count.
pub(crate) fn ratio(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    sum / Decimal::from(count)
}

pub(crate) fn round1(value: Decimal) -> Decimal {
    value.round_dp(1)
}

pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

pub(crate) fn round3(value: Decimal) -> Decimal {
    value.round_dp(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use journal_core::types::Direction;

    fn closed(r: Decimal) -> ClosedTrade {
        let trade = Trade {
            id: 1,
            date: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
            instrument: "EURUSD".to_string(),
            session: SessionType::London,
            setup: "BOS".to_string(),
            direction: Direction::Sell,
            timeframe: "M5".to_string(),
            entry: dec!(1.1),
            stop_loss: dec!(1.101),
            take_profit: None,
            risk_pct: dec!(1),
            risk_usd: dec!(100),
            rr_expected: dec!(2),
            result_r: Some(r),
            pnl_usd: None,
            duration_min: None,
            respected_plan: true,
            error: false,
            error_type: ErrorType::None,
            mental_state: None,
            notes: None,
        };
        ClosedTrade::from_trade(trade).unwrap()
    }

    #[test]
    fn test_outcomes_tally() {
        let trades: Vec<_> = [dec!(2), dec!(-1), dec!(0), dec!(1), dec!(-0.5)]
            .into_iter()
            .map(closed)
            .collect();
        let o = Outcomes::tally(&trades);

        assert_eq!(o.total, 5);
        assert_eq!((o.winners, o.losers, o.breakevens), (2, 2, 1));
        assert_eq!(o.gross_profit, dec!(3));
        assert_eq!(o.gross_loss, dec!(1.5));
        assert_eq!(o.total_r, dec!(1.5));
        assert_eq!(o.winrate(), dec!(40));
        assert_eq!(o.avg_win_r(), dec!(1.5));
        assert_eq!(o.avg_loss_r(), dec!(-0.75));
        // 0.4 * 1.5 - 0.4 * 0.75
        assert_eq!(o.expectancy(), dec!(0.3));
        assert_eq!(o.profit_factor(), dec!(2));
    }

    #[test]
    fn test_profit_factor_cap() {
        let trades: Vec<_> = [dec!(1), dec!(0)].into_iter().map(closed).collect();
        assert_eq!(Outcomes::tally(&trades).profit_factor(), PROFIT_FACTOR_CAP);
    }

    #[test]
    fn test_empty_outcomes_are_zero() {
        let o = Outcomes::tally(&[]);
        assert_eq!(o.winrate(), Decimal::ZERO);
        assert_eq!(o.expectancy(), Decimal::ZERO);
        assert_eq!(o.avg_r(), Decimal::ZERO);
    }

    #[test]
    fn test_drawdown_from_flat_start() {
        let trades: Vec<_> = [dec!(-1), dec!(-2)].into_iter().map(closed).collect();
        let (dd, dd_pct) = max_drawdown(&trades);
        assert_eq!(dd, dec!(3));
        assert_eq!(dd_pct, Decimal::ZERO);
    }

    #[test]
    fn test_rounding_is_half_even() {
        assert_eq!(round2(dec!(1.005)), dec!(1.00));
        assert_eq!(round2(dec!(1.015)), dec!(1.02));
        assert_eq!(round3(dec!(0.33333)), dec!(0.333));
        assert_eq!(round1(dec!(42.25)), dec!(42.2));
    }
}
