// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight drain coordinator.
//!
//! Owns the [`SyncContext`] and the transport, watches the shared link
//! state, and turns "the link is up" into delivered mutations. All status
//! bookkeeping lives here: the queue only stores items, the coordinator
//! decides what the aggregate state means.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use ml_core::clock::millis_to_utc;
use ml_core::{
    CacheEntry, ClockSource, MutationKind, QueueItem, Result, SyncContext, SyncStats, SyncStatus,
    SystemClock, WorkOrder,
};

use crate::link::SharedLinkState;
use crate::transport::Transport;

const STATUS_SYNCED: u8 = 0;
const STATUS_PENDING: u8 = 1;
const STATUS_SYNCING: u8 = 2;
const STATUS_ERROR: u8 = 3;
const STATUS_OFFLINE: u8 = 4;

/// Memoized aggregate status, recomputed after every mutating operation
/// and read lock-free by `status()` and `stats()`.
struct StatusCell {
    value: AtomicU8,
}

impl StatusCell {
    fn new() -> Self {
        StatusCell { value: AtomicU8::new(STATUS_SYNCED) }
    }

    fn set(&self, status: SyncStatus) {
        let raw = match status {
            SyncStatus::Synced => STATUS_SYNCED,
            SyncStatus::Pending => STATUS_PENDING,
            SyncStatus::Syncing => STATUS_SYNCING,
            SyncStatus::Error => STATUS_ERROR,
            SyncStatus::Offline => STATUS_OFFLINE,
        };
        self.value.store(raw, Ordering::Release);
    }

    fn get(&self) -> SyncStatus {
        match self.value.load(Ordering::Acquire) {
            STATUS_PENDING => SyncStatus::Pending,
            STATUS_SYNCING => SyncStatus::Syncing,
            STATUS_ERROR => SyncStatus::Error,
            STATUS_OFFLINE => SyncStatus::Offline,
            _ => SyncStatus::Synced,
        }
    }
}

/// Tally of one drain pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainReport {
    /// Items the pass tried to deliver.
    pub attempted: u64,
    /// Items delivered and removed from the queue.
    pub delivered: u64,
    /// Items whose attempt failed and stayed queued.
    pub failed: u64,
}

/// What happened to a drain trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// A pass ran to completion.
    Completed(DrainReport),
    /// The link was down; nothing was attempted.
    SkippedOffline,
    /// Another drain was already in flight.
    SkippedBusy,
}

/// Drives queued mutations through the transport while the link is up.
///
/// Shared via [`Arc`]: the store sits behind an async mutex that is held
/// across each per-item delivery, so items are processed strictly one at
/// a time in queue order.
pub struct Coordinator<T: Transport, C: ClockSource = SystemClock> {
    ctx: Mutex<SyncContext<C>>,
    transport: Mutex<T>,
    link: Arc<SharedLinkState>,
    /// Single-flight guard. Acquired with a compare-exchange before the
    /// first await of a drain, so a re-entrant trigger observes it.
    draining: AtomicBool,
    status: StatusCell,
    /// Completion time of the last drain pass in epoch ms, 0 = never.
    /// Mirrors the store's persisted value so reads stay lock-free.
    last_sync_ms: AtomicU64,
}

impl<T, C> Coordinator<T, C>
where
    T: Transport + 'static,
    C: ClockSource + 'static,
{
    /// Build a coordinator and compute the initial aggregate status from
    /// whatever the store already holds.
    ///
    /// Items a previous process left marked as in flight are reclaimed
    /// here, so a crash mid-pass never strands a mutation.
    pub fn new(mut ctx: SyncContext<C>, transport: T, link: Arc<SharedLinkState>) -> Result<Self> {
        let reclaimed = ctx.queue().recover_in_flight()?;
        if reclaimed > 0 {
            warn!(reclaimed, "reclaimed in-flight items from a previous process");
        }
        let pending = ctx.queue().pending_count()?;
        let failed = ctx.queue().failed_count()?;
        let last_sync_ms = ctx
            .last_sync()?
            .map(|at| at.timestamp_millis().max(0) as u64)
            .unwrap_or(0);

        let coordinator = Coordinator {
            ctx: Mutex::new(ctx),
            transport: Mutex::new(transport),
            link,
            draining: AtomicBool::new(false),
            status: StatusCell::new(),
            last_sync_ms: AtomicU64::new(last_sync_ms),
        };
        coordinator.status.set(coordinator.compute_status(pending, failed));
        Ok(coordinator)
    }

    /// Durably enqueue a mutation.
    ///
    /// The item is persisted and the aggregate status refreshed; callers
    /// holding an [`Arc`] follow up with [`Coordinator::spawn_drain`] so
    /// an online enqueue is delivered right away.
    pub async fn enqueue(
        &self,
        kind: MutationKind,
        work_order_id: &str,
        payload: serde_json::Value,
    ) -> Result<QueueItem> {
        let item = {
            let mut ctx = self.ctx.lock().await;
            ctx.queue().enqueue(kind, work_order_id, payload)?
        };
        debug!(item = %item.id, kind = %item.kind, work_order = %work_order_id, "enqueued mutation");
        self.refresh_status().await?;
        Ok(item)
    }

    /// Kick off a background drain pass.
    ///
    /// Offline or already-draining triggers fall out of the pass itself;
    /// spawning is always safe.
    pub fn spawn_drain(self: Arc<Self>) {
        tokio::spawn(async move {
            if let Err(e) = self.sync_now().await {
                warn!(error = %e, "background drain failed");
            }
        });
    }

    /// Run one drain pass, unless offline or one is already in flight.
    ///
    /// The single-flight flag is taken synchronously before the first
    /// await, so two back-to-back triggers produce exactly one pass.
    pub async fn sync_now(&self) -> Result<DrainOutcome> {
        if !self.link.is_online() {
            self.status.set(SyncStatus::Offline);
            return Ok(DrainOutcome::SkippedOffline);
        }

        if self
            .draining
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("drain already in flight, skipping");
            return Ok(DrainOutcome::SkippedBusy);
        }

        self.status.set(SyncStatus::Syncing);
        let pass = self.drain_once().await;
        self.draining.store(false, Ordering::SeqCst);

        let report = match pass {
            Ok(report) => report,
            Err(e) => {
                // Leave last_sync untouched: the pass never ran.
                self.refresh_status().await?;
                return Err(e);
            }
        };

        let now_ms = {
            let mut ctx = self.ctx.lock().await;
            let now_ms = ctx.clock().now_ms();
            if let Some(at) = millis_to_utc(now_ms) {
                ctx.set_last_sync(at)?;
            }
            now_ms
        };
        self.last_sync_ms.store(now_ms, Ordering::SeqCst);
        self.refresh_status().await?;

        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed,
            "drain pass finished"
        );
        Ok(DrainOutcome::Completed(report))
    }

    /// Deliver the current drainable snapshot, strictly one item at a
    /// time. Items enqueued while this runs wait for the next pass.
    async fn drain_once(&self) -> Result<DrainReport> {
        let drainable = {
            let mut ctx = self.ctx.lock().await;
            ctx.queue().list_drainable()?
        };

        let mut report = DrainReport::default();
        for item in drainable {
            report.attempted += 1;
            let id = item.id.clone();

            {
                let mut ctx = self.ctx.lock().await;
                if let Err(e) = ctx.queue().mark_processing(&id) {
                    warn!(item = %id, error = %e, "could not mark item processing, skipping");
                    report.failed += 1;
                    continue;
                }
            }

            let delivery = {
                let mut transport = self.transport.lock().await;
                transport.deliver(item).await
            };

            let mut ctx = self.ctx.lock().await;
            match delivery {
                Ok(()) => {
                    if let Err(e) = ctx.queue().complete(&id) {
                        // Delivered but still queued; the next pass will
                        // retry and the backend sees a duplicate.
                        warn!(item = %id, error = %e, "delivered item could not be removed");
                        report.failed += 1;
                    } else {
                        debug!(item = %id, "delivered");
                        report.delivered += 1;
                    }
                }
                Err(e) => {
                    debug!(item = %id, error = %e, "delivery failed");
                    report.failed += 1;
                    if let Err(store_err) = ctx.queue().record_failure(&id, &e.to_string()) {
                        warn!(item = %id, error = %store_err, "could not record delivery failure");
                    }
                }
            }
        }

        Ok(report)
    }

    /// Recompute and memoize the aggregate status from the queue counts
    /// and the link state. Returns the new value.
    pub async fn refresh_status(&self) -> Result<SyncStatus> {
        let (pending, failed) = {
            let mut ctx = self.ctx.lock().await;
            let queue = ctx.queue();
            (queue.pending_count()?, queue.failed_count()?)
        };
        let status = self.compute_status(pending, failed);
        self.status.set(status);
        Ok(status)
    }

    fn compute_status(&self, pending: u64, failed: u64) -> SyncStatus {
        if !self.link.is_online() {
            SyncStatus::Offline
        } else if self.draining.load(Ordering::SeqCst) {
            SyncStatus::Syncing
        } else if failed > 0 {
            SyncStatus::Error
        } else if pending > 0 {
            SyncStatus::Pending
        } else {
            SyncStatus::Synced
        }
    }

    /// Current sync health summary.
    pub async fn stats(&self) -> Result<SyncStats> {
        let (pending, failed, cached) = {
            let mut ctx = self.ctx.lock().await;
            let pending = ctx.queue().pending_count()?;
            let failed = ctx.queue().failed_count()?;
            let cached = ctx.cache().count()?;
            (pending, failed, cached)
        };

        Ok(SyncStats {
            is_online: self.link.is_online(),
            status: self.status.get(),
            pending_count: pending,
            failed_count: failed,
            cached_work_orders: cached,
            last_sync: self.last_sync(),
        })
    }

    /// Look up a queued item by id.
    pub async fn queue_item(&self, id: &str) -> Result<QueueItem> {
        let mut ctx = self.ctx.lock().await;
        ctx.queue().get(id)
    }

    /// Snapshot of the whole queue in insertion order.
    pub async fn queue_items(&self) -> Result<Vec<QueueItem>> {
        let mut ctx = self.ctx.lock().await;
        ctx.queue().list()
    }

    /// Cache a work-order snapshot for offline reads.
    pub async fn cache_work_order(&self, work_order: &WorkOrder) -> Result<CacheEntry> {
        let mut ctx = self.ctx.lock().await;
        ctx.cache().put(work_order)
    }

    /// The live cached snapshot for a work order.
    ///
    /// Best effort: a storage failure degrades to a miss.
    pub async fn cached_work_order(&self, work_order_id: &str) -> Option<WorkOrder> {
        let mut ctx = self.ctx.lock().await;
        match ctx.cache().get(work_order_id) {
            Ok(found) => found,
            Err(e) => {
                warn!(work_order = %work_order_id, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Whether a live snapshot exists for this work order. Best effort.
    pub async fn is_work_order_cached(&self, work_order_id: &str) -> bool {
        let mut ctx = self.ctx.lock().await;
        match ctx.cache().contains(work_order_id) {
            Ok(cached) => cached,
            Err(e) => {
                warn!(work_order = %work_order_id, error = %e, "cache check failed, treating as miss");
                false
            }
        }
    }

    /// Sweep expired cache entries. Returns how many were reclaimed.
    pub async fn sweep_cache(&self) -> Result<usize> {
        let evicted = {
            let mut ctx = self.ctx.lock().await;
            ctx.cache().evict_expired()?
        };
        if evicted > 0 {
            info!(evicted, "swept expired work orders from cache");
        }
        Ok(evicted)
    }

    /// The memoized aggregate status.
    pub fn status(&self) -> SyncStatus {
        self.status.get()
    }

    /// Whether the link is currently up.
    pub fn is_online(&self) -> bool {
        self.link.is_online()
    }

    /// Completion time of the most recent drain pass.
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        match self.last_sync_ms.load(Ordering::SeqCst) {
            0 => None,
            ms => millis_to_utc(ms),
        }
    }
}
