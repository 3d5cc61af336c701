// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Work-order snapshots and their cache envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A work-order snapshot as received from the backend.
///
/// Only the identifier is interpreted here; every other field rides along
/// in `fields` so the cache never lags behind backend schema changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Backend identifier, e.g. `wo-42`.
    pub id: String,
    /// Remaining snapshot fields, passed through untouched.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl WorkOrder {
    /// Creates a snapshot with just an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        WorkOrder { id: id.into(), fields: serde_json::Map::new() }
    }
}

/// A cached work-order snapshot with its retention window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached snapshot.
    pub work_order: WorkOrder,
    /// When the snapshot was cached.
    pub cached_at: DateTime<Utc>,
    /// When the entry stops being served. An entry with
    /// `expires_at <= now` is a miss even if still stored.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "work_order_tests.rs"]
mod tests;
