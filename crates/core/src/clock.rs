//! Time source for reservation open/close events.

use std::sync::Mutex;

use chrono::SubsecRound;

use crate::types::Timestamp;

/// Supplies the current UTC time to the core.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Truncate to the microsecond resolution PostgreSQL `TIMESTAMPTZ` stores,
/// so a value billed in memory equals the value read back.
pub fn to_db_precision(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(6)
}

/// Wall-clock time, at database precision.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        to_db_precision(chrono::Utc::now())
    }
}

/// A manually driven clock for tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
