//! Statistics engine.

use chrono::{Datelike, Duration, NaiveDate};
use journal_core::types::{ErrorType, SessionType, Trade};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::report::JournalReport;
use crate::statistics::{
    max_drawdown, percent, ratio, round1, round2, round3, ClosedTrade, DailyStats, EquityPoint,
    ErrorStats, GlobalStats, MentalStateStats, Outcomes, SessionStats, SetupStats, WeeklyStats,
};

/// Computes performance reports over a snapshot of journal trades.
///
/// Only completed trades (those with a known `result_r`) are kept; open
/// trades are dropped at construction. Every report is a pure read of that
/// snapshot, so reports may be requested in any order and repeatedly.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    completed: Vec<ClosedTrade>,
}

impl StatisticsEngine {
    /// Create an engine over already-filtered trades, in any order.
    pub fn new(trades: impl IntoIterator<Item = Trade>) -> Self {
        let mut received = 0usize;
        let completed: Vec<ClosedTrade> = trades
            .into_iter()
            .inspect(|_| received += 1)
            .filter_map(ClosedTrade::from_trade)
            .collect();

        debug!(
            trades = received,
            completed = completed.len(),
            "Statistics engine created"
        );

        Self { completed }
    }

    /// Number of completed trades in the snapshot.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Aggregate statistics over all completed trades.
    ///
    /// Returns the all-zero record when there is nothing to measure.
    pub fn global_stats(&self) -> GlobalStats {
        if self.completed.is_empty() {
            return GlobalStats::default();
        }

        let outcomes = Outcomes::tally(&self.completed);
        let total = outcomes.total;
        let (max_dd_r, max_dd_pct) = max_drawdown(self.chronological());

        let rr_expected_sum = self
            .completed
            .iter()
            .fold(Decimal::ZERO, |sum, c| sum.saturating_add(c.trade.rr_expected));
        let respected = self
            .completed
            .iter()
            .filter(|c| c.trade.respected_plan)
            .count();

        let durations: Vec<u32> = self
            .completed
            .iter()
            .filter_map(|c| c.trade.duration_min)
            .collect();
        let duration_sum: Decimal = durations.iter().map(|&d| Decimal::from(d)).sum();

        GlobalStats {
            total_trades: total,
            winning_trades: outcomes.winners,
            losing_trades: outcomes.losers,
            breakeven_trades: outcomes.breakevens,
            winrate: round2(outcomes.winrate()),
            avg_win_r: round2(outcomes.avg_win_r()),
            avg_loss_r: round2(outcomes.avg_loss_r()),
            expectancy: round3(outcomes.expectancy()),
            profit_factor: outcomes.profit_factor(),
            total_pnl_usd: round2(outcomes.total_pnl),
            total_r: round2(outcomes.total_r),
            max_drawdown_r: round2(max_dd_r),
            max_drawdown_pct: round2(max_dd_pct),
            avg_rr_expected: round2(ratio(rr_expected_sum, total)),
            avg_rr_actual: round2(outcomes.avg_r()),
            discipline_rate: round2(percent(respected, total)),
            avg_duration_min: round1(ratio(duration_sum, durations.len())),
        }
    }

    /// Statistics per setup, best total R first.
    pub fn stats_by_setup(&self) -> Vec<SetupStats> {
        let mut groups: BTreeMap<&str, Vec<&ClosedTrade>> = BTreeMap::new();
        for closed in &self.completed {
            groups.entry(closed.trade.setup.as_str()).or_default().push(closed);
        }

        let mut results: Vec<SetupStats> = groups
            .into_iter()
            .map(|(setup, trades)| {
                let outcomes = Outcomes::tally(trades);
                SetupStats {
                    setup: setup.to_string(),
                    total_trades: outcomes.total,
                    winrate: round2(outcomes.winrate()),
                    expectancy: round3(outcomes.expectancy()),
                    total_r: round2(outcomes.total_r),
                    avg_rr: round2(outcomes.avg_r()),
                    profit_factor: outcomes.profit_factor(),
                }
            })
            .collect();

        // Stable sort keeps label order among equal totals.
        results.sort_by(|a, b| b.total_r.cmp(&a.total_r));
        results
    }

    /// Statistics per trading session, best total R first.
    pub fn stats_by_session(&self) -> Vec<SessionStats> {
        let mut groups: BTreeMap<SessionType, Vec<&ClosedTrade>> = BTreeMap::new();
        for closed in &self.completed {
            groups.entry(closed.trade.session).or_default().push(closed);
        }

        let mut results: Vec<SessionStats> = groups
            .into_iter()
            .map(|(session, trades)| {
                let outcomes = Outcomes::tally(trades);
                SessionStats {
                    session,
                    total_trades: outcomes.total,
                    winrate: round2(outcomes.winrate()),
                    expectancy: round3(outcomes.expectancy()),
                    total_r: round2(outcomes.total_r),
                    avg_rr: round2(outcomes.avg_r()),
                }
            })
            .collect();

        results.sort_by(|a, b| b.total_r.cmp(&a.total_r));
        results
    }

    /// Per-day results for the most recent `days` trading days, newest first.
    pub fn daily_stats(&self, days: usize) -> Vec<DailyStats> {
        let mut groups: BTreeMap<NaiveDate, Vec<&ClosedTrade>> = BTreeMap::new();
        for closed in &self.completed {
            groups.entry(closed.trade.date.date_naive()).or_default().push(closed);
        }

        groups
            .into_iter()
            .rev()
            .take(days)
            .map(|(date, trades)| {
                let outcomes = Outcomes::tally(trades);
                DailyStats {
                    date,
                    total_trades: outcomes.total,
                    winning_trades: outcomes.winners,
                    losing_trades: outcomes.losers,
                    total_r: round2(outcomes.total_r),
                    pnl_usd: round2(outcomes.total_pnl),
                    winrate: round2(outcomes.winrate()),
                }
            })
            .collect()
    }

    /// Per-week results for the most recent `weeks` weeks, newest first.
    ///
    /// Weeks start on Monday.
    pub fn weekly_stats(&self, weeks: usize) -> Vec<WeeklyStats> {
        let mut groups: BTreeMap<NaiveDate, Vec<&ClosedTrade>> = BTreeMap::new();
        for closed in &self.completed {
            let week_start = week_start(closed.trade.date.date_naive());
            groups.entry(week_start).or_default().push(closed);
        }

        groups
            .into_iter()
            .rev()
            .take(weeks)
            .map(|(week_start, trades)| {
                let outcomes = Outcomes::tally(trades);
                WeeklyStats {
                    week_start,
                    week_end: week_start + Duration::days(6),
                    total_trades: outcomes.total,
                    winning_trades: outcomes.winners,
                    losing_trades: outcomes.losers,
                    total_r: round2(outcomes.total_r),
                    pnl_usd: round2(outcomes.total_pnl),
                    winrate: round2(outcomes.winrate()),
                    expectancy: round3(outcomes.expectancy()),
                }
            })
            .collect()
    }

    /// Mistake frequency among trades flagged with an error, most frequent
    /// first.
    ///
    /// The average loss only looks at the losing trades of each error type:
    /// it measures what the mistake costs when it goes wrong.
    pub fn error_stats(&self) -> Vec<ErrorStats> {
        let mut groups: Vec<(ErrorType, Vec<&ClosedTrade>)> = Vec::new();
        let mut total_errors = 0usize;

        for closed in self.completed.iter().filter(|c| c.trade.error) {
            total_errors += 1;
            let error_type = closed.trade.error_type;
            match groups.iter_mut().find(|(kind, _)| *kind == error_type) {
                Some((_, trades)) => trades.push(closed),
                None => groups.push((error_type, vec![closed])),
            }
        }

        let mut results: Vec<ErrorStats> = groups
            .into_iter()
            .map(|(error_type, trades)| {
                let losses: Vec<Decimal> = trades
                    .iter()
                    .filter(|c| c.trade.is_loser())
                    .map(|c| c.result_r)
                    .collect();
                let loss_sum = losses.iter().fold(Decimal::ZERO, |sum, r| sum.saturating_add(*r));

                ErrorStats {
                    error_type,
                    count: trades.len(),
                    percentage: round2(percent(trades.len(), total_errors)),
                    avg_loss_r: round2(ratio(loss_sum, losses.len())),
                }
            })
            .collect();

        // Ties keep first-seen order.
        results.sort_by(|a, b| b.count.cmp(&a.count));
        results
    }

    /// Results per mental state level 1..=5, skipping levels never recorded.
    pub fn mental_state_correlation(&self) -> Vec<MentalStateStats> {
        let mut levels: [Vec<&ClosedTrade>; 5] = Default::default();
        for closed in &self.completed {
            if let Some(state @ 1..=5) = closed.trade.mental_state {
                levels[usize::from(state - 1)].push(closed);
            }
        }

        levels
            .into_iter()
            .zip(1u8..)
            .filter(|(trades, _)| !trades.is_empty())
            .map(|(trades, state)| {
                let outcomes = Outcomes::tally(trades);
                MentalStateStats {
                    mental_state: state,
                    total_trades: outcomes.total,
                    winrate: round2(outcomes.winrate()),
                    avg_result_r: round2(outcomes.avg_r()),
                }
            })
            .collect()
    }

    /// Cumulative R and P&L after each trade, oldest first.
    pub fn equity_curve(&self) -> Vec<EquityPoint> {
        let mut cumulative_r = Decimal::ZERO;
        let mut cumulative_pnl = Decimal::ZERO;

        self.chronological()
            .into_iter()
            .enumerate()
            .map(|(i, closed)| {
                cumulative_r = cumulative_r.saturating_add(closed.result_r);
                cumulative_pnl = cumulative_pnl.saturating_add(closed.trade.pnl_or_zero());
                EquityPoint {
                    date: closed.trade.date,
                    cumulative_r: round2(cumulative_r),
                    cumulative_pnl: round2(cumulative_pnl),
                    trade_count: i + 1,
                }
            })
            .collect()
    }

    /// Every report in one bundle.
    pub fn full_report(&self, days: usize, weeks: usize) -> JournalReport {
        JournalReport {
            global: self.global_stats(),
            by_setup: self.stats_by_setup(),
            by_session: self.stats_by_session(),
            daily: self.daily_stats(days),
            weekly: self.weekly_stats(weeks),
            errors: self.error_stats(),
            mental_state: self.mental_state_correlation(),
            equity_curve: self.equity_curve(),
        }
    }

    /// Completed trades sorted by open time. Equal times keep input order.
    fn chronological(&self) -> Vec<&ClosedTrade> {
        let mut sorted: Vec<&ClosedTrade> = self.completed.iter().collect();
        sorted.sort_by_key(|c| c.trade.date);
        sorted
    }
}

/// Monday of the week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
