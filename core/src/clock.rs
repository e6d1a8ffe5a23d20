//! Reference clock: the single notion of "now" for one dataset.
//!
//! Synthesis offsets (start dates, creation timestamps) and the
//! "created today" metric both read this clock, never the system time
//! directly. Day boundaries are UTC.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceClock {
    now: DateTime<Utc>,
}

impl ReferenceClock {
    /// Pin the clock to an explicit instant (tests, replays).
    pub fn fixed(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Capture the current system time once. The clock does not advance
    /// afterwards.
    pub fn system() -> Self {
        Self { now: Utc::now() }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// The current UTC calendar day.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
