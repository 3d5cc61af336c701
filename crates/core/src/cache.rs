// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! TTL cache of work-order snapshots for offline reads.
//!
//! Expiry is a read-side policy: a stored entry with
//! `expires_at <= now` is a miss. Reads lazily evict the expired row
//! they trip over; [`WorkOrderCache::evict_expired`] sweeps the rest.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::clock::{millis_to_utc, ClockSource, SystemClock};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::work_order::{CacheEntry, WorkOrder};

/// Default retention window for cached work orders.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

fn utc_at(ms: u64) -> Result<DateTime<Utc>> {
    millis_to_utc(ms).ok_or_else(|| Error::CorruptedData(format!("timestamp {ms} out of range")))
}

/// Cache operations bound to a database, a TTL, and a clock.
pub struct WorkOrderCache<'a, C: ClockSource = SystemClock> {
    db: &'a mut Database,
    ttl_ms: u64,
    clock: &'a C,
}

impl<'a, C: ClockSource> WorkOrderCache<'a, C> {
    /// Creates a cache view over the given database.
    pub fn new(db: &'a mut Database, ttl_ms: u64, clock: &'a C) -> Self {
        WorkOrderCache { db, ttl_ms, clock }
    }

    /// Store or overwrite the snapshot for its work order, restarting the
    /// retention window. Returns the stored entry.
    pub fn put(&mut self, work_order: &WorkOrder) -> Result<CacheEntry> {
        let now_ms = self.clock.now_ms();
        let entry = CacheEntry {
            work_order: work_order.clone(),
            cached_at: utc_at(now_ms)?,
            expires_at: utc_at(now_ms.saturating_add(self.ttl_ms))?,
        };
        self.db.put_cache_entry(&entry)?;
        Ok(entry)
    }

    /// The live snapshot for a work order, or `None` on a miss.
    ///
    /// An expired row counts as a miss and is evicted on the way out.
    pub fn get(&mut self, work_order_id: &str) -> Result<Option<WorkOrder>> {
        let now_ms = self.clock.now_ms();
        match self.db.get_cache_entry(work_order_id)? {
            None => Ok(None),
            Some(entry) if entry.expires_at.timestamp_millis() <= now_ms as i64 => {
                self.db.delete_cache_entry(work_order_id)?;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.work_order)),
        }
    }

    /// Whether a live entry exists for this work order. Read-only; an
    /// expired row is left for `get` or the sweep to reclaim.
    pub fn contains(&self, work_order_id: &str) -> Result<bool> {
        Ok(self
            .db
            .get_live_work_order(work_order_id, self.clock.now_ms())?
            .is_some())
    }

    /// The live cache entry with its retention window, if any.
    pub fn entry(&self, work_order_id: &str) -> Result<Option<CacheEntry>> {
        let now_ms = self.clock.now_ms();
        Ok(self
            .db
            .get_cache_entry(work_order_id)?
            .filter(|e| e.expires_at.timestamp_millis() > now_ms as i64))
    }

    /// Sweep every expired entry. Returns how many were reclaimed.
    pub fn evict_expired(&mut self) -> Result<usize> {
        self.db.purge_expired_entries(self.clock.now_ms())
    }

    /// Drop an entry regardless of expiry. Returns whether it existed.
    pub fn remove(&mut self, work_order_id: &str) -> Result<bool> {
        self.db.delete_cache_entry(work_order_id)
    }

    /// Number of live entries.
    pub fn count(&self) -> Result<u64> {
        self.db.count_live_entries(self.clock.now_ms())
    }

    /// Live entries, most recently cached first.
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        self.db.list_live_entries(self.clock.now_ms())
    }

    /// The retention window applied on `put`, in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
