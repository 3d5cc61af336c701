// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the mlrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'mule init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("queue item not found: {0}")]
    ItemNotFound(String),

    #[error("work order not cached: {0}")]
    WorkOrderNotCached(String),

    #[error("invalid mutation kind: '{0}'\n  hint: valid kinds are: photo, checklist, documentation, work_order_update")]
    InvalidKind(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid payload: {0}\n  hint: the payload must be a JSON document")]
    InvalidPayload(String),

    #[error("daemon is not running\n  hint: start it with 'mule daemon start'")]
    DaemonNotRunning,

    #[error("daemon error: {0}")]
    Daemon(String),

    #[error("daemon version mismatch: daemon is v{daemon_version}, CLI is v{cli_version}")]
    DaemonVersionMismatch {
        daemon_version: String,
        cli_version: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data in database: {0}")]
    CorruptedData(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for mlrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<ml_core::Error> for Error {
    fn from(e: ml_core::Error) -> Self {
        match e {
            ml_core::Error::ItemNotFound(id) => Error::ItemNotFound(id),
            ml_core::Error::WorkOrderNotFound(id) => Error::WorkOrderNotCached(id),
            ml_core::Error::InvalidMutationKind(s) => Error::InvalidKind(s),
            ml_core::Error::InvalidItemStatus(s) => {
                Error::CorruptedData(format!("unknown item status: {}", s))
            }
            ml_core::Error::InvalidSyncStatus(s) => {
                Error::CorruptedData(format!("unknown sync status: {}", s))
            }
            ml_core::Error::InvalidInput(s) => Error::InvalidInput(s),
            ml_core::Error::Database(e) => Error::Database(e),
            ml_core::Error::Io(e) => Error::Io(e),
            ml_core::Error::Json(e) => Error::Json(e),
            ml_core::Error::CorruptedData(s) => Error::CorruptedData(s),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
