// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable mutation queue over the SQLite store.
//!
//! [`MutationQueue`] is a borrow view handed out by
//! [`crate::context::SyncContext`]; it pairs the database with the retry
//! policy so "drainable" always means the same thing to every caller.

use chrono::Utc;

use crate::db::Database;
use crate::error::Result;
use crate::id::generate_unique_item_id;
use crate::mutation::{ItemStatus, MutationKind, QueueItem};
use crate::retry::RetryPolicy;

/// Queue operations bound to a database and a retry policy.
pub struct MutationQueue<'a> {
    db: &'a mut Database,
    policy: RetryPolicy,
}

impl<'a> MutationQueue<'a> {
    /// Creates a queue view over the given database.
    pub fn new(db: &'a mut Database, policy: RetryPolicy) -> Self {
        MutationQueue { db, policy }
    }

    /// Durably enqueue a mutation. The stored item starts pending and is
    /// visible to the next drain pass.
    pub fn enqueue(
        &mut self,
        kind: MutationKind,
        work_order_id: &str,
        payload: serde_json::Value,
    ) -> Result<QueueItem> {
        let enqueued_at = Utc::now();
        let id = generate_unique_item_id(kind, work_order_id, &enqueued_at, |candidate| {
            self.db.item_exists(candidate).unwrap_or(false)
        });

        let item = QueueItem::new(id, kind, work_order_id.to_string(), payload, enqueued_at);
        self.db.insert_item(&item)?;
        Ok(item)
    }

    /// Items eligible for the next drain pass, in insertion order.
    pub fn list_drainable(&self) -> Result<Vec<QueueItem>> {
        self.db.list_drainable(self.policy.max_retries)
    }

    /// Mark an item as having a delivery attempt in flight.
    pub fn mark_processing(&mut self, id: &str) -> Result<()> {
        self.db.set_item_status(id, ItemStatus::Processing)
    }

    /// Record a failed delivery attempt for an item.
    pub fn record_failure(&mut self, id: &str, error: &str) -> Result<()> {
        self.db.record_item_failure(id, error)
    }

    /// Remove a delivered item. Completion is removal; the queue never
    /// stores a "completed" status.
    pub fn complete(&mut self, id: &str) -> Result<()> {
        self.db.delete_item(id)?;
        Ok(())
    }

    /// Remove an item regardless of its state. Returns whether it existed.
    /// This is the operator escape hatch for terminal items.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        self.db.delete_item(id)
    }

    /// Reclaim items a dead process left marked as in flight. Returns how
    /// many went back to pending.
    pub fn recover_in_flight(&mut self) -> Result<u64> {
        self.db.recover_in_flight()
    }

    /// Get an item by ID.
    pub fn get(&self, id: &str) -> Result<QueueItem> {
        self.db.get_item(id)
    }

    /// All items in insertion order.
    pub fn list(&self) -> Result<Vec<QueueItem>> {
        self.db.list_items()
    }

    /// Items in a given status, in insertion order.
    pub fn list_with_status(&self, status: ItemStatus) -> Result<Vec<QueueItem>> {
        self.db.list_items_with_status(status)
    }

    /// Items targeting a work order, in insertion order.
    pub fn for_work_order(&self, work_order_id: &str) -> Result<Vec<QueueItem>> {
        self.db.items_for_work_order(work_order_id)
    }

    /// Total number of queued items.
    pub fn len(&self) -> Result<u64> {
        self.db.count_items()
    }

    /// Whether the queue holds no items at all.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Number of pending items.
    pub fn pending_count(&self) -> Result<u64> {
        self.db.count_items_with_status(ItemStatus::Pending)
    }

    /// Number of failed items, terminal ones included.
    pub fn failed_count(&self) -> Result<u64> {
        self.db.count_items_with_status(ItemStatus::Failed)
    }

    /// Number of failed items with no retry budget left.
    pub fn exhausted_count(&self) -> Result<u64> {
        self.db.count_exhausted(self.policy.max_retries)
    }

    /// The retry policy this queue drains under.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
