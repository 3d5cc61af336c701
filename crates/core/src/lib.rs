// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ml-core: Shared library for the mule sync agent
//!
//! This crate provides the durable mutation queue, the work-order cache,
//! and the storage primitives used by both the mule CLI and its daemon.

pub mod cache;
pub mod clock;
pub mod context;
pub mod db;
pub mod error;
pub mod id;
pub mod mutation;
pub mod queue;
pub mod retry;
pub mod status;
pub mod work_order;

pub use cache::{WorkOrderCache, DEFAULT_CACHE_TTL};
pub use clock::{ClockSource, SystemClock};
pub use context::SyncContext;
pub use db::Database;
pub use error::{Error, Result};
pub use mutation::{ItemStatus, MutationKind, QueueItem};
pub use queue::MutationQueue;
pub use retry::{RetryPolicy, DEFAULT_MAX_RETRIES};
pub use status::{SyncStats, SyncStatus};
pub use work_order::{CacheEntry, WorkOrder};
