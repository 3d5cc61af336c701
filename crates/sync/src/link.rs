// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network reachability signal.
//!
//! mule does not probe the network itself. Something outside (the CLI, a
//! platform hook, a test) tells the [`LinkMonitor`] whether the link is up,
//! and the coordinator reads the shared state and reacts to transition
//! events.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

/// Link state values for the atomic state field.
pub const LINK_DOWN: u8 = 0;
pub const LINK_UP: u8 = 1;

/// Link state visible to both the monitor and the drain coordinator.
///
/// Uses an atomic field for lock-free reads from the drain path.
pub struct SharedLinkState {
    /// Current state (atomic for lock-free reads).
    state: AtomicU8,
}

impl SharedLinkState {
    /// Create a shared state with the given initial reachability.
    pub fn new(online: bool) -> Self {
        Self { state: AtomicU8::new(if online { LINK_UP } else { LINK_DOWN }) }
    }

    /// Check if the link is currently up.
    pub fn is_online(&self) -> bool {
        self.state.load(Ordering::Acquire) == LINK_UP
    }

    /// Set the state. Returns true if this was a genuine transition.
    pub fn set_online(&self, online: bool) -> bool {
        let next = if online { LINK_UP } else { LINK_DOWN };
        self.state.swap(next, Ordering::AcqRel) != next
    }
}

/// Events sent from the monitor to whoever drives drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// The link came up.
    Up,
    /// The link went down.
    Down,
}

/// Owns the shared link state and fans out transition events.
///
/// Duplicate signals (up while already up) are swallowed so consumers
/// only ever see genuine transitions.
pub struct LinkMonitor {
    shared: Arc<SharedLinkState>,
    event_tx: mpsc::Sender<LinkEvent>,
}

impl LinkMonitor {
    /// Create a monitor with the given initial reachability.
    ///
    /// Returns the monitor and a receiver for transition events.
    pub fn new(initially_online: bool) -> (Self, mpsc::Receiver<LinkEvent>) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let monitor =
            Self { shared: Arc::new(SharedLinkState::new(initially_online)), event_tx };
        (monitor, event_rx)
    }

    /// The shared state handle the coordinator reads.
    pub fn shared(&self) -> Arc<SharedLinkState> {
        Arc::clone(&self.shared)
    }

    /// Signal that the link came up. Emits [`LinkEvent::Up`] on a genuine
    /// transition; returns whether one happened.
    pub async fn set_online(&self) -> bool {
        self.transition(true).await
    }

    /// Signal that the link went down. Emits [`LinkEvent::Down`] on a
    /// genuine transition; returns whether one happened.
    pub async fn set_offline(&self) -> bool {
        self.transition(false).await
    }

    async fn transition(&self, online: bool) -> bool {
        let changed = self.shared.set_online(online);
        if changed {
            let event = if online { LinkEvent::Up } else { LinkEvent::Down };
            let _ = self.event_tx.send(event).await;
        }
        changed
    }
}
