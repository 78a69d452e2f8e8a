//! Journal report generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::statistics::{
    DailyStats, EquityPoint, ErrorStats, GlobalStats, MentalStateStats, SessionStats, SetupStats,
    WeeklyStats,
};

const RULE: &str = "═══════════════════════════════════════════════════════════\n";
const SECTION_RULE: &str = "───────────────────────────────────────────────────────────\n";

/// Selects one report, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Global,
    BySetup,
    BySession,
    Daily,
    Weekly,
    Errors,
    Mental,
    EquityCurve,
    All,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportKind::Global => "global",
            ReportKind::BySetup => "by-setup",
            ReportKind::BySession => "by-session",
            ReportKind::Daily => "daily",
            ReportKind::Weekly => "weekly",
            ReportKind::Errors => "errors",
            ReportKind::Mental => "mental",
            ReportKind::EquityCurve => "equity-curve",
            ReportKind::All => "all",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "global" => Ok(ReportKind::Global),
            "by-setup" | "setup" => Ok(ReportKind::BySetup),
            "by-session" | "session" => Ok(ReportKind::BySession),
            "daily" => Ok(ReportKind::Daily),
            "weekly" => Ok(ReportKind::Weekly),
            "errors" => Ok(ReportKind::Errors),
            "mental" => Ok(ReportKind::Mental),
            "equity-curve" | "equity" => Ok(ReportKind::EquityCurve),
            "all" => Ok(ReportKind::All),
            _ => Err(format!("Invalid report: {}", s)),
        }
    }
}

/// Every statistics report over one trade selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalReport {
    pub global: GlobalStats,
    pub by_setup: Vec<SetupStats>,
    pub by_session: Vec<SessionStats>,
    pub daily: Vec<DailyStats>,
    pub weekly: Vec<WeeklyStats>,
    pub errors: Vec<ErrorStats>,
    pub mental_state: Vec<MentalStateStats>,
    pub equity_curve: Vec<EquityPoint>,
}

impl JournalReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(RULE);
        s.push_str("                   TRADING JOURNAL REPORT                   \n");
        s.push_str(RULE);
        s.push('\n');

        s.push_str(&global_summary(&self.global));
        s.push('\n');

        if !self.by_setup.is_empty() {
            s.push_str(&setup_summary(&self.by_setup));
            s.push('\n');
        }
        if !self.by_session.is_empty() {
            s.push_str(&session_summary(&self.by_session));
            s.push('\n');
        }
        if !self.errors.is_empty() {
            s.push_str(&error_summary(&self.errors));
            s.push('\n');
        }
        if !self.mental_state.is_empty() {
            s.push_str(&mental_summary(&self.mental_state));
            s.push('\n');
        }

        s.push_str(RULE);
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export a single report to JSON.
    pub fn section_to_json(&self, kind: ReportKind) -> Result<String, serde_json::Error> {
        match kind {
            ReportKind::Global => serde_json::to_string_pretty(&self.global),
            ReportKind::BySetup => serde_json::to_string_pretty(&self.by_setup),
            ReportKind::BySession => serde_json::to_string_pretty(&self.by_session),
            ReportKind::Daily => serde_json::to_string_pretty(&self.daily),
            ReportKind::Weekly => serde_json::to_string_pretty(&self.weekly),
            ReportKind::Errors => serde_json::to_string_pretty(&self.errors),
            ReportKind::Mental => serde_json::to_string_pretty(&self.mental_state),
            ReportKind::EquityCurve => serde_json::to_string_pretty(&self.equity_curve),
            ReportKind::All => self.to_json(),
        }
    }

    /// Generate a text rendering of a single report.
    pub fn section_summary(&self, kind: ReportKind) -> String {
        match kind {
            ReportKind::Global => global_summary(&self.global),
            ReportKind::BySetup => setup_summary(&self.by_setup),
            ReportKind::BySession => session_summary(&self.by_session),
            ReportKind::Daily => daily_summary(&self.daily),
            ReportKind::Weekly => weekly_summary(&self.weekly),
            ReportKind::Errors => error_summary(&self.errors),
            ReportKind::Mental => mental_summary(&self.mental_state),
            ReportKind::EquityCurve => self.equity_to_csv(),
            ReportKind::All => self.summary(),
        }
    }

    /// Export the equity curve as CSV.
    pub fn equity_to_csv(&self) -> String {
        let mut csv = String::from("date,cumulative_r,cumulative_pnl,trade_count\n");
        for point in &self.equity_curve {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                point.date.format("%Y-%m-%d %H:%M"),
                point.cumulative_r,
                point.cumulative_pnl,
                point.trade_count
            ));
        }
        csv
    }
}

fn global_summary(g: &GlobalStats) -> String {
    let mut s = String::new();

    s.push_str("PERFORMANCE\n");
    s.push_str(SECTION_RULE);
    s.push_str(&format!("  Total R:             {:.2}R\n", g.total_r));
    s.push_str(&format!("  Total P&L:           ${:.2}\n", g.total_pnl_usd));
    s.push_str(&format!("  Expectancy:          {:.3}R\n", g.expectancy));
    s.push_str(&format!("  Profit Factor:       {:.2}\n", g.profit_factor));
    s.push_str(&format!("  Max Drawdown:        {:.2}R ({:.2}%)\n", g.max_drawdown_r, g.max_drawdown_pct));
    s.push('\n');

    s.push_str("TRADE STATISTICS\n");
    s.push_str(SECTION_RULE);
    s.push_str(&format!("  Total Trades:        {}\n", g.total_trades));
    s.push_str(&format!("  Winning Trades:      {}\n", g.winning_trades));
    s.push_str(&format!("  Losing Trades:       {}\n", g.losing_trades));
    s.push_str(&format!("  Breakeven Trades:    {}\n", g.breakeven_trades));
    s.push_str(&format!("  Win Rate:            {:.2}%\n", g.winrate));
    s.push_str(&format!("  Avg Win:             {:.2}R\n", g.avg_win_r));
    s.push_str(&format!("  Avg Loss:            {:.2}R\n", g.avg_loss_r));
    s.push_str(&format!("  Avg RR Expected:     {:.2}\n", g.avg_rr_expected));
    s.push_str(&format!("  Avg RR Actual:       {:.2}\n", g.avg_rr_actual));
    s.push('\n');

    s.push_str("DISCIPLINE\n");
    s.push_str(SECTION_RULE);
    s.push_str(&format!("  Plan Respected:      {:.2}%\n", g.discipline_rate));
    s.push_str(&format!("  Avg Duration:        {:.1} min\n", g.avg_duration_min));

    s
}

fn setup_summary(rows: &[SetupStats]) -> String {
    let mut s = String::from("BY SETUP\n");
    s.push_str(SECTION_RULE);
    for row in rows {
        s.push_str(&format!(
            "  {:<18} {:>4} trades  {:>6.2}%  {:>8.2}R  E {:>6.3}  PF {:>6.2}\n",
            row.setup, row.total_trades, row.winrate, row.total_r, row.expectancy, row.profit_factor
        ));
    }
    s
}

fn session_summary(rows: &[SessionStats]) -> String {
    let mut s = String::from("BY SESSION\n");
    s.push_str(SECTION_RULE);
    for row in rows {
        s.push_str(&format!(
            "  {:<18} {:>4} trades  {:>6.2}%  {:>8.2}R  E {:>6.3}\n",
            row.session.label(),
            row.total_trades,
            row.winrate,
            row.total_r,
            row.expectancy
        ));
    }
    s
}

fn daily_summary(rows: &[DailyStats]) -> String {
    let mut s = String::from("DAILY\n");
    s.push_str(SECTION_RULE);
    for row in rows {
        s.push_str(&format!(
            "  {}  {:>4} trades  {:>3}W {:>3}L  {:>8.2}R  ${:>10.2}  {:>6.2}%\n",
            row.date,
            row.total_trades,
            row.winning_trades,
            row.losing_trades,
            row.total_r,
            row.pnl_usd,
            row.winrate
        ));
    }
    s
}

fn weekly_summary(rows: &[WeeklyStats]) -> String {
    let mut s = String::from("WEEKLY\n");
    s.push_str(SECTION_RULE);
    for row in rows {
        s.push_str(&format!(
            "  {} → {}  {:>4} trades  {:>8.2}R  ${:>10.2}  {:>6.2}%  E {:>6.3}\n",
            row.week_start,
            row.week_end,
            row.total_trades,
            row.total_r,
            row.pnl_usd,
            row.winrate,
            row.expectancy
        ));
    }
    s
}

fn error_summary(rows: &[ErrorStats]) -> String {
    let mut s = String::from("ERRORS\n");
    s.push_str(SECTION_RULE);
    for row in rows {
        s.push_str(&format!(
            "  {:<18} {:>4}x  {:>6.2}%  avg loss {:>6.2}R\n",
            row.error_type.label(),
            row.count,
            row.percentage,
            row.avg_loss_r
        ));
    }
    s
}

fn mental_summary(rows: &[MentalStateStats]) -> String {
    let mut s = String::from("MENTAL STATE\n");
    s.push_str(SECTION_RULE);
    for row in rows {
        s.push_str(&format!(
            "  Level {}  {:>4} trades  {:>6.2}%  avg {:>6.2}R\n",
            row.mental_state, row.total_trades, row.winrate, row.avg_result_r
        ));
    }
    s
}
