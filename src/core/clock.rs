//! Time source for the tracker. Production code uses the system clock;
//! backdated CLI entries and tests substitute a fixed or manual one.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::cell::Cell;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock moved forward explicitly by the caller.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start.trunc_subsecs(0)),
        }
    }

    pub fn set(&self, ts: DateTime<Utc>) {
        self.now.set(ts.trunc_subsecs(0));
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.now.set(self.now.get() + Duration::minutes(minutes));
    }

    pub fn advance_seconds(&self, seconds: i64) {
        self.now.set(self.now.get() + Duration::seconds(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
