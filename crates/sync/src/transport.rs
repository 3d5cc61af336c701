// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery transport abstraction.
//!
//! Provides a trait-based transport layer that enables:
//! - A real backend client in production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use ml_core::QueueItem;

/// Error type for delivery attempts.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The backend could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The backend refused the mutation.
    #[error("delivery rejected: {0}")]
    Rejected(String),

    /// The attempt ran out of time.
    #[error("delivery timed out after {0:?}")]
    TimedOut(Duration),
}

/// Result type for delivery attempts.
pub type TransportResult<T> = Result<T, TransportError>;

/// Transport trait for delivering queued mutations.
///
/// This trait abstracts over the actual delivery mechanism, allowing for
/// easy testing with mock implementations. Implementations own their
/// timeouts; the coordinator does not impose one. The full item is passed
/// so an implementation can derive an idempotency key from `item.id`.
pub trait Transport: Send + Sync {
    /// Attempt to deliver one mutation to the backend.
    fn deliver(
        &mut self,
        item: QueueItem,
    ) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>>;
}

/// Stand-in transport that accepts everything after a fixed delay.
///
/// Mirrors the delivery behavior mule is developed against until the
/// ingest API client lands: every mutation is accepted, and the delay
/// approximates a round trip.
pub struct SimulatedTransport {
    delay: Duration,
}

impl SimulatedTransport {
    /// Create a simulated transport with the given round-trip delay.
    pub fn new(delay: Duration) -> Self {
        SimulatedTransport { delay }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl Transport for SimulatedTransport {
    fn deliver(
        &mut self,
        _item: QueueItem,
    ) -> Pin<Box<dyn Future<Output = TransportResult<()>> + Send + '_>> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(())
        })
    }
}
