//! Trade selection criteria applied by stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{SessionType, Trade};

/// Optional predicates narrowing the trades handed to the statistics engine.
///
/// Date bounds are inclusive. An empty filter matches every trade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub instrument: Option<String>,
    pub setup: Option<String>,
    pub session: Option<SessionType>,
}

impl TradeFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.date_to = Some(date);
        self
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }

    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(setup.into());
        self
    }

    pub fn with_session(mut self, session: SessionType) -> Self {
        self.session = Some(session);
        self
    }

    /// Check whether a trade satisfies every set predicate.
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(from) = self.date_from {
            if trade.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if trade.date > to {
                return false;
            }
        }
        if let Some(instrument) = &self.instrument {
            if &trade.instrument != instrument {
                return false;
            }
        }
        if let Some(setup) = &self.setup {
            if &trade.setup != setup {
                return false;
            }
        }
        if let Some(session) = self.session {
            if trade.session != session {
                return false;
            }
        }
        true
    }
}
