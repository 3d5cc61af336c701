// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ml-core operations.

use thiserror::Error;

/// All possible errors that can occur in ml-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("queue item not found: {0}")]
    ItemNotFound(String),

    #[error("work order not found: {0}")]
    WorkOrderNotFound(String),

    #[error(
        "invalid mutation kind: '{0}'\n  hint: valid kinds are: photo, checklist, documentation, work_order_update"
    )]
    InvalidMutationKind(String),

    #[error(
        "invalid item status: '{0}'\n  hint: valid statuses are: pending, processing, failed"
    )]
    InvalidItemStatus(String),

    #[error(
        "invalid sync status: '{0}'\n  hint: valid statuses are: synced, pending, syncing, error, offline"
    )]
    InvalidSyncStatus(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for ml-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
