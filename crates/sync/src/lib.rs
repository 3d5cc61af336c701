// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ml-sync: drain engine for the mule offline queue.
//!
//! Watches the link, and when it is up delivers queued mutations one at a
//! time through an injected transport.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Coordinator  │────►│  Transport  │────►│   Backend   │
//! │ (drain loop) │◄────│   (trait)   │◄────│  (ingest)   │
//! └──────────────┘     └─────────────┘     └─────────────┘
//!        │  ▲
//!        ▼  │ LinkEvent
//! ┌──────────────┐     ┌─────────────┐
//! │ SyncContext  │     │ LinkMonitor │  (reachability signal)
//! │ (queue+cache)│     └─────────────┘
//! └──────────────┘
//! ```
//!
//! # Guarantees
//!
//! - Single-flight drains: concurrent triggers collapse into one pass
//! - Strictly sequential delivery in queue insertion order
//! - Per-item failure isolation with a capped retry budget
//! - Aggregate status memoized after every mutating operation

mod coordinator;
mod link;
mod transport;

pub use coordinator::{Coordinator, DrainOutcome, DrainReport};
pub use link::{LinkEvent, LinkMonitor, SharedLinkState};
pub use transport::{SimulatedTransport, Transport, TransportError, TransportResult};

#[cfg(test)]
mod test_helpers;
