// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared IPC protocol for CLI-daemon communication.
//!
//! This crate defines the message types and framing protocol used between
//! the `mule` CLI and the sync daemon. Messages are serialized as JSON
//! with length-prefixed framing, over a Unix domain socket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export the model types the protocol carries (canonical definitions
// live in core).
pub use ml_core::{MutationKind, QueueItem, SyncStats, SyncStatus, WorkOrder};

// ============================================================================
// Protocol types
// ============================================================================

/// Request sent from CLI to daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonRequest {
    /// Ping to check if daemon is alive.
    Ping,
    /// Version handshake request.
    Hello { version: String },
    /// Get daemon status and sync health.
    Status,
    /// Trigger a drain pass and wait for its outcome.
    SyncNow,
    /// Durably enqueue a mutation.
    Enqueue {
        kind: MutationKind,
        work_order_id: String,
        payload: serde_json::Value,
    },
    /// Cache a work-order snapshot for offline reads.
    CacheWorkOrder { work_order: WorkOrder },
    /// Get the live cached snapshot for a work order.
    GetCachedWorkOrder { work_order_id: String },
    /// Check whether a live snapshot exists for a work order.
    IsWorkOrderCached { work_order_id: String },
    /// Sweep expired cache entries.
    SweepCache,
    /// Tell the daemon the link went up or down.
    SetLink { online: bool },
    /// Graceful shutdown.
    Shutdown,
}

/// What a drain trigger amounted to, as reported over the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result")]
pub enum SyncOutcome {
    /// A pass ran to completion.
    Completed {
        attempted: u64,
        delivered: u64,
        failed: u64,
    },
    /// The link was down; nothing was attempted.
    Offline,
    /// Another drain was already in flight.
    Busy,
}

/// Response sent from daemon to CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonResponse {
    /// Pong response.
    Pong,
    /// Version handshake response.
    Hello { version: String },
    /// Status response.
    Status(AgentStatus),
    /// Drain trigger finished.
    SyncFinished { outcome: SyncOutcome },
    /// Mutation stored.
    Enqueued { item: QueueItem },
    /// Snapshot cached; live until the given instant.
    CacheUpdated { expires_at: DateTime<Utc> },
    /// Cached snapshot, or `None` on a miss.
    CachedWorkOrder { work_order: Option<WorkOrder> },
    /// Whether a live snapshot exists.
    Cached { value: bool },
    /// Cache sweep finished.
    SweepFinished { evicted: u64 },
    /// Link signal applied. `changed` is false for duplicate signals.
    LinkChanged { online: bool, changed: bool },
    /// Shutdown acknowledged.
    ShuttingDown,
    /// Error response.
    Error { message: String },
}

/// Daemon status information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentStatus {
    /// Current daemon PID.
    pub pid: u32,
    /// Uptime in seconds.
    pub uptime_secs: u64,
    /// Delivery endpoint the daemon is configured against, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Sync health at the time of the request.
    pub stats: SyncStats,
}

impl AgentStatus {
    /// Create a new status with the given parameters.
    pub fn new(pid: u32, uptime_secs: u64, stats: SyncStats) -> Self {
        Self { pid, uptime_secs, endpoint: None, stats }
    }

    /// Sets the configured endpoint (builder pattern).
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint;
        self
    }
}

// ============================================================================
// Message framing
// ============================================================================

/// IPC message framing.
///
/// Messages are framed as:
/// - 4 bytes: message length (big-endian u32)
/// - N bytes: JSON-encoded message
pub mod framing {
    use std::io::{Read, Write};

    use serde::de::DeserializeOwned;
    use serde::Serialize;

    /// Maximum message size (1MB) to prevent malformed messages from causing hangs.
    pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

    /// Write a serializable message to the given writer.
    pub fn write_message<W: Write, T: Serialize>(
        writer: &mut W,
        message: &T,
    ) -> std::io::Result<()> {
        let json = serde_json::to_vec(message)
            .map_err(|e| std::io::Error::other(format!("serialize error: {}", e)))?;
        let len =
            u32::try_from(json.len()).map_err(|_| std::io::Error::other("message too large"))?;
        writer.write_all(&len.to_be_bytes())?;
        writer.write_all(&json)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a deserializable message from the given reader.
    pub fn read_message<R: Read, T: DeserializeOwned>(reader: &mut R) -> std::io::Result<T> {
        let mut len_buf = [0u8; 4];
        reader.read_exact(&mut len_buf)?;
        let len = u32::from_be_bytes(len_buf) as usize;

        if len > MAX_MESSAGE_SIZE {
            return Err(std::io::Error::other(format!(
                "message too large: {} bytes (max {})",
                len, MAX_MESSAGE_SIZE
            )));
        }

        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;

        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::other(format!("deserialize error: {}", e)))
    }
}

/// Async twin of [`framing`] for the daemon's tokio sockets.
///
/// Produces and consumes the exact same bytes, so either side of a
/// connection can be sync or async.
pub mod framing_async {
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

    use super::framing::MAX_MESSAGE_SIZE;

    /// Write a serializable message to the given async writer.
    pub async fn write_message<W, T>(writer: &mut W, message: &T) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
        T: Serialize,
    {
        let json = serde_json::to_vec(message)
            .map_err(|e| std::io::Error::other(format!("serialize error: {}", e)))?;
        let len =
            u32::try_from(json.len()).map_err(|_| std::io::Error::other("message too large"))?;
        writer.write_all(&len.to_be_bytes()).await?;
        writer.write_all(&json).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Read a deserializable message from the given async reader.
    pub async fn read_message<R, T>(reader: &mut R) -> std::io::Result<T>
    where
        R: AsyncRead + Unpin,
        T: DeserializeOwned,
    {
        let mut len_buf = [0u8; 4];
        reader.read_exact(&mut len_buf).await?;
        let len = u32::from_be_bytes(len_buf) as usize;

        if len > MAX_MESSAGE_SIZE {
            return Err(std::io::Error::other(format!(
                "message too large: {} bytes (max {})",
                len, MAX_MESSAGE_SIZE
            )));
        }

        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).await?;

        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::other(format!("deserialize error: {}", e)))
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
