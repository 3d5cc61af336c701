// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ml_ipc::SyncOutcome;
use ml_sync::{Coordinator, DrainOutcome, LinkMonitor, SimulatedTransport};

use crate::error::Result;

pub fn run(json: bool) -> Result<()> {
    let (config, work_dir) = super::load_workspace()?;

    if let Some(mut client) = super::daemon_client(&work_dir, &config)? {
        let outcome = client.sync_now()?;
        print_outcome(&outcome, json)?;
        return Ok(());
    }

    // One-shot pass without a daemon: build the whole stack inline and
    // tear it down when the pass finishes.
    let ctx = super::open_store(&work_dir, &config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(async move {
        let (monitor, _events) = LinkMonitor::new(config.net.assume_online);
        let transport = SimulatedTransport::new(config.transport_delay());
        let coordinator = Coordinator::new(ctx, transport, monitor.shared())?;
        coordinator.sync_now().await
    })?;

    print_outcome(&outcome_to_wire(outcome), json)?;
    Ok(())
}

/// Convert a drain outcome into its wire form shared with the daemon.
pub(crate) fn outcome_to_wire(outcome: DrainOutcome) -> SyncOutcome {
    match outcome {
        DrainOutcome::Completed(report) => SyncOutcome::Completed {
            attempted: report.attempted,
            delivered: report.delivered,
            failed: report.failed,
        },
        DrainOutcome::SkippedOffline => SyncOutcome::Offline,
        DrainOutcome::SkippedBusy => SyncOutcome::Busy,
    }
}

fn print_outcome(outcome: &SyncOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    match outcome {
        SyncOutcome::Completed { attempted: 0, .. } => println!("Nothing to sync."),
        SyncOutcome::Completed {
            attempted,
            delivered,
            failed,
        } => {
            if *failed > 0 {
                println!(
                    "Synced {} of {} item(s), {} failed",
                    delivered, attempted, failed
                );
            } else {
                println!("Synced {} of {} item(s)", delivered, attempted);
            }
        }
        SyncOutcome::Offline => println!("Sync skipped: link is offline"),
        SyncOutcome::Busy => println!("Sync skipped: a sync pass is already running"),
    }
    Ok(())
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
