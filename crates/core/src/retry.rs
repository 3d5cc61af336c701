// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Retry budget for queued mutations.

use crate::mutation::{ItemStatus, QueueItem};

/// Default number of failed attempts before an item stops being drained.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Decides whether a failed item gets another delivery attempt.
///
/// The policy is a value passed into the context so tests and callers can
/// tighten or loosen the budget without touching the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Failed attempts allowed before an item becomes terminal.
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Creates a policy with the given retry cap.
    pub fn new(max_retries: u32) -> Self {
        RetryPolicy { max_retries }
    }

    /// Whether this item is eligible for another delivery attempt.
    ///
    /// Pending items always qualify. Failed items qualify while their
    /// retry count is under the cap. Processing items never qualify; a
    /// drain pass owns them already.
    pub fn should_retry(&self, item: &QueueItem) -> bool {
        match item.status {
            ItemStatus::Pending => true,
            ItemStatus::Failed => item.retry_count < self.max_retries,
            ItemStatus::Processing => false,
        }
    }

    /// Whether this item has used up its retry budget.
    pub fn is_exhausted(&self, item: &QueueItem) -> bool {
        item.status == ItemStatus::Failed && item.retry_count >= self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy { max_retries: DEFAULT_MAX_RETRIES }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
