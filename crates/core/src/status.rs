// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate sync health, derived from the queue and the link state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Overall sync state reported to callers.
///
/// Precedence when several conditions hold at once:
/// `Offline` > `Syncing` > `Error` > `Pending` > `Synced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Queue empty, nothing failed, link up.
    Synced,
    /// Items waiting for the next drain.
    Pending,
    /// A drain pass is in flight.
    Syncing,
    /// At least one item is in the failed state.
    Error,
    /// The link is down; nothing can be delivered.
    Offline,
}

impl SyncStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Synced => "synced",
            SyncStatus::Pending => "pending",
            SyncStatus::Syncing => "syncing",
            SyncStatus::Error => "error",
            SyncStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "synced" => Ok(SyncStatus::Synced),
            "pending" => Ok(SyncStatus::Pending),
            "syncing" => Ok(SyncStatus::Syncing),
            "error" => Ok(SyncStatus::Error),
            "offline" => Ok(SyncStatus::Offline),
            _ => Err(Error::InvalidSyncStatus(s.to_string())),
        }
    }
}

/// Point-in-time sync health summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Whether the link is currently up.
    pub is_online: bool,
    /// Aggregate status, see [`SyncStatus`].
    pub status: SyncStatus,
    /// Items in `pending` state.
    pub pending_count: u64,
    /// Items in `failed` state, terminal ones included.
    pub failed_count: u64,
    /// Live (unexpired) cached work orders.
    pub cached_work_orders: u64,
    /// Completion time of the most recent drain pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
