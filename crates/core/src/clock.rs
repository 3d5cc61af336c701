// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction so cache expiry and sync timestamps are
//! testable without sleeping.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};

/// A source of wall-clock time.
pub trait ClockSource: Send + Sync {
    /// Returns the current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> u64;

    /// Returns the current time as a UTC datetime.
    fn now_utc(&self) -> DateTime<Utc> {
        millis_to_utc(self.now_ms()).unwrap_or_default()
    }
}

/// System clock implementation using `std::time::SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
    }
}

impl<C: ClockSource> ClockSource for &C {
    fn now_ms(&self) -> u64 {
        (*self).now_ms()
    }
}

/// Converts epoch milliseconds to a UTC datetime, `None` if out of range.
pub fn millis_to_utc(ms: u64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms as i64).single()
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
