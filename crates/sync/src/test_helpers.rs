// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ml_core::{ClockSource, Database, RetryPolicy, SyncContext};

use super::coordinator::Coordinator;
use super::link::LinkMonitor;
use super::transport_tests::MockTransport;

/// Epoch instant every harness clock starts at.
pub const T0_MS: u64 = 1_700_000_000_000;

/// One day in milliseconds, the cache TTL the harness runs with.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Manually advanced clock shared between a test and its context.
#[derive(Clone)]
pub struct TestClock(Arc<AtomicU64>);

impl TestClock {
    pub fn at(ms: u64) -> Self {
        TestClock(Arc::new(AtomicU64::new(ms)))
    }

    pub fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockSource for TestClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Build a coordinator over an in-memory store with a manual clock and
/// the default retry policy. The transport is usually a clone of a
/// [`MockTransport`] the test keeps for scripting and assertions.
pub fn make_coordinator(
    online: bool,
    transport: MockTransport,
) -> (Arc<Coordinator<MockTransport, TestClock>>, LinkMonitor, TestClock) {
    let clock = TestClock::at(T0_MS);
    let db = Database::open_in_memory().unwrap();
    let ctx = SyncContext::with_clock(
        db,
        RetryPolicy::default(),
        Duration::from_millis(DAY_MS),
        clock.clone(),
    );
    let (monitor, _events) = LinkMonitor::new(online);
    let coordinator = Arc::new(Coordinator::new(ctx, transport, monitor.shared()).unwrap());
    (coordinator, monitor, clock)
}
