//! # Time source
//!
//! Stages never read the OS clock directly. The hour of day driving the
//! solar model and the air-quality timestamp both come from a `TimeSource`,
//! so tests can pin or advance simulated time without waiting on real time.

use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};

/// Capability supplying the current local time. Queried once per tick.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Real local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable time source for tests and scripted runs.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().expect("clock lock") = now;
    }

    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock lock")
    }
}
