// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core mutation types for the mule sync agent.
//!
//! This module contains the fundamental queue data types: `QueueItem`,
//! `MutationKind`, and `ItemStatus`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Classification of queued mutations by what they change on a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// A captured photo awaiting upload.
    Photo,
    /// A checklist item state change.
    Checklist,
    /// A free-form documentation note.
    Documentation,
    /// An edit to the work order's own fields.
    WorkOrderUpdate,
}

impl MutationKind {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Photo => "photo",
            MutationKind::Checklist => "checklist",
            MutationKind::Documentation => "documentation",
            MutationKind::WorkOrderUpdate => "work_order_update",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MutationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "photo" => Ok(MutationKind::Photo),
            "checklist" => Ok(MutationKind::Checklist),
            "documentation" => Ok(MutationKind::Documentation),
            "work_order_update" | "work-order-update" => Ok(MutationKind::WorkOrderUpdate),
            _ => Err(Error::InvalidMutationKind(s.to_string())),
        }
    }
}

/// Delivery state of a queued mutation.
///
/// There is no stored "completed" state: a delivered item is removed from
/// the queue, so every row present is still awaiting delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Not yet attempted. Initial state for new items.
    Pending,
    /// Delivery attempt in flight.
    Processing,
    /// Last delivery attempt failed.
    Failed,
}

impl ItemStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Processing => "processing",
            ItemStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ItemStatus::Pending),
            "processing" => Ok(ItemStatus::Processing),
            "failed" => Ok(ItemStatus::Failed),
            _ => Err(Error::InvalidItemStatus(s.to_string())),
        }
    }
}

/// A durably queued mutation awaiting delivery to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Unique identifier (format: `mu-{hash}`).
    pub id: String,
    /// What this mutation changes.
    pub kind: MutationKind,
    /// The work order the mutation targets.
    pub work_order_id: String,
    /// Kind-specific data, opaque to the queue.
    pub payload: serde_json::Value,
    /// Current delivery state.
    pub status: ItemStatus,
    /// Number of failed delivery attempts. Never resets.
    pub retry_count: u32,
    /// Message from the most recent failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// When the mutation was enqueued.
    pub enqueued_at: DateTime<Utc>,
}

impl QueueItem {
    /// Creates a fresh pending item with no attempts recorded.
    pub fn new(
        id: String,
        kind: MutationKind,
        work_order_id: String,
        payload: serde_json::Value,
        enqueued_at: DateTime<Utc>,
    ) -> Self {
        QueueItem {
            id,
            kind,
            work_order_id,
            payload,
            status: ItemStatus::Pending,
            retry_count: 0,
            last_error: None,
            enqueued_at,
        }
    }
}

#[cfg(test)]
#[path = "mutation_tests.rs"]
mod tests;
