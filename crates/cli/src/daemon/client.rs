// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! IPC client for communicating with the running agent.
//!
//! Provides a connection to the daemon and typed methods for each request.
//! Connecting performs a version handshake so a stale daemon from an older
//! install is reported instead of answering with a mismatched protocol.

use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ml_core::{MutationKind, QueueItem, WorkOrder};
use ml_ipc::framing;
use ml_ipc::{AgentStatus, DaemonRequest, DaemonResponse, SyncOutcome};

use crate::error::{Error, Result};

/// Connection timeout for daemon communication.
const TIMEOUT_SECS: u64 = 5;

/// A client connection to the daemon.
pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    /// Connect to the daemon at the given socket path and verify versions
    /// match.
    pub fn connect(socket_path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(socket_path)
            .map_err(|e| Error::Daemon(format!("failed to connect to daemon: {}", e)))?;

        stream
            .set_read_timeout(Some(Duration::from_secs(TIMEOUT_SECS)))
            .map_err(|e| Error::Daemon(format!("failed to set read timeout: {}", e)))?;
        stream
            .set_write_timeout(Some(Duration::from_secs(TIMEOUT_SECS)))
            .map_err(|e| Error::Daemon(format!("failed to set write timeout: {}", e)))?;

        let mut client = DaemonClient { stream };
        client.handshake()?;
        Ok(client)
    }

    /// Exchange Hello messages and compare versions.
    fn handshake(&mut self) -> Result<()> {
        let cli_version = env!("CARGO_PKG_VERSION");
        let response = self.request(DaemonRequest::Hello {
            version: cli_version.to_string(),
        })?;
        match response {
            DaemonResponse::Hello { version } if version == cli_version => Ok(()),
            DaemonResponse::Hello { version } => Err(Error::DaemonVersionMismatch {
                daemon_version: version,
                cli_version: cli_version.to_string(),
            }),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Send a request and receive a response.
    fn request(&mut self, request: DaemonRequest) -> Result<DaemonResponse> {
        framing::write_message(&mut self.stream, &request)?;
        Ok(framing::read_message(&mut self.stream)?)
    }

    /// Check that the daemon is responsive.
    pub fn ping(&mut self) -> Result<()> {
        match self.request(DaemonRequest::Ping)? {
            DaemonResponse::Pong => Ok(()),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Fetch the agent's status and sync health.
    pub fn status(&mut self) -> Result<AgentStatus> {
        match self.request(DaemonRequest::Status)? {
            DaemonResponse::Status(status) => Ok(status),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Trigger a drain pass and wait for its outcome.
    pub fn sync_now(&mut self) -> Result<SyncOutcome> {
        match self.request(DaemonRequest::SyncNow)? {
            DaemonResponse::SyncFinished { outcome } => Ok(outcome),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Durably enqueue a mutation through the daemon.
    pub fn enqueue(
        &mut self,
        kind: MutationKind,
        work_order_id: &str,
        payload: serde_json::Value,
    ) -> Result<QueueItem> {
        match self.request(DaemonRequest::Enqueue {
            kind,
            work_order_id: work_order_id.to_string(),
            payload,
        })? {
            DaemonResponse::Enqueued { item } => Ok(item),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Cache a work-order snapshot. Returns when the entry expires.
    pub fn cache_work_order(&mut self, work_order: &WorkOrder) -> Result<DateTime<Utc>> {
        match self.request(DaemonRequest::CacheWorkOrder {
            work_order: work_order.clone(),
        })? {
            DaemonResponse::CacheUpdated { expires_at } => Ok(expires_at),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Get the live cached snapshot for a work order, if any.
    pub fn cached_work_order(&mut self, work_order_id: &str) -> Result<Option<WorkOrder>> {
        match self.request(DaemonRequest::GetCachedWorkOrder {
            work_order_id: work_order_id.to_string(),
        })? {
            DaemonResponse::CachedWorkOrder { work_order } => Ok(work_order),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Check whether a live snapshot exists for a work order.
    pub fn is_cached(&mut self, work_order_id: &str) -> Result<bool> {
        match self.request(DaemonRequest::IsWorkOrderCached {
            work_order_id: work_order_id.to_string(),
        })? {
            DaemonResponse::Cached { value } => Ok(value),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Sweep expired cache entries. Returns how many were evicted.
    pub fn sweep_cache(&mut self) -> Result<u64> {
        match self.request(DaemonRequest::SweepCache)? {
            DaemonResponse::SweepFinished { evicted } => Ok(evicted),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Tell the daemon the link went up or down. Returns whether the state
    /// actually flipped.
    pub fn set_link(&mut self, online: bool) -> Result<bool> {
        match self.request(DaemonRequest::SetLink { online })? {
            DaemonResponse::LinkChanged { changed, .. } => Ok(changed),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }

    /// Request a graceful shutdown.
    pub fn shutdown(&mut self) -> Result<()> {
        match self.request(DaemonRequest::Shutdown)? {
            DaemonResponse::ShuttingDown => Ok(()),
            DaemonResponse::Error { message } => Err(Error::Daemon(message)),
            other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
        }
    }
}
