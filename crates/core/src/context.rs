// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process handle bundling the store, retry policy, TTL, and clock.
//!
//! There is no global state: one [`SyncContext`] is built at startup and
//! passed to whatever needs queue or cache access. The queue and cache
//! are borrow views handed out by this context, so both always operate
//! under the same policy and clock.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::WorkOrderCache;
use crate::clock::{ClockSource, SystemClock};
use crate::db::Database;
use crate::error::Result;
use crate::queue::MutationQueue;
use crate::retry::RetryPolicy;

/// Owns the database plus the knobs the queue and cache operate under.
pub struct SyncContext<C: ClockSource = SystemClock> {
    db: Database,
    policy: RetryPolicy,
    ttl_ms: u64,
    clock: C,
}

impl SyncContext<SystemClock> {
    /// Open (creating if needed) the store at `path` on the system clock.
    pub fn open(path: &Path, policy: RetryPolicy, ttl: Duration) -> Result<Self> {
        let db = Database::open(path)?;
        Ok(Self::with_clock(db, policy, ttl, SystemClock))
    }

    /// In-memory context (for testing) on the system clock.
    pub fn open_in_memory(policy: RetryPolicy, ttl: Duration) -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_clock(db, policy, ttl, SystemClock))
    }
}

impl<C: ClockSource> SyncContext<C> {
    /// Build a context over an already-open database and a custom clock.
    pub fn with_clock(db: Database, policy: RetryPolicy, ttl: Duration, clock: C) -> Self {
        SyncContext { db, policy, ttl_ms: ttl.as_millis() as u64, clock }
    }

    /// Queue view under this context's retry policy.
    pub fn queue(&mut self) -> MutationQueue<'_> {
        MutationQueue::new(&mut self.db, self.policy)
    }

    /// Cache view under this context's TTL and clock.
    pub fn cache(&mut self) -> WorkOrderCache<'_, C> {
        WorkOrderCache::new(&mut self.db, self.ttl_ms, &self.clock)
    }

    /// The clock every timestamp decision goes through.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// When the last drain pass ran to completion, if ever.
    pub fn last_sync(&self) -> Result<Option<DateTime<Utc>>> {
        self.db.get_last_sync()
    }

    /// Record the completion time of a drain pass.
    pub fn set_last_sync(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.db.set_last_sync(at)
    }

    /// The retry policy drains run under.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// The cache retention window in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
