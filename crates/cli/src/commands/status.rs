// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ml_core::{SyncContext, SyncStats, SyncStatus};

use crate::display;
use crate::error::Result;

pub fn run(json: bool) -> Result<()> {
    let (config, work_dir) = super::load_workspace()?;

    if let Some(mut client) = super::daemon_client(&work_dir, &config)? {
        let status = client.status()?;
        if json {
            println!("{}", serde_json::to_string_pretty(&status.stats)?);
        } else {
            println!("{}", display::format_stats(&status.stats));
            println!(
                "Daemon: running (pid {}, uptime {}s)",
                status.pid, status.uptime_secs
            );
        }
        return Ok(());
    }

    let mut ctx = super::open_store(&work_dir, &config)?;
    let stats = store_stats(&mut ctx, config.net.assume_online)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", display::format_stats(&stats));
        println!("Daemon: not running");
    }
    Ok(())
}

/// Compute stats straight from the store when no daemon is running.
///
/// Without a daemon there is no live link or in-flight pass, so the link
/// state comes from config.
fn store_stats(ctx: &mut SyncContext, is_online: bool) -> Result<SyncStats> {
    let pending_count = ctx.queue().pending_count()?;
    let failed_count = ctx.queue().failed_count()?;
    let cached_work_orders = ctx.cache().count()?;
    let last_sync = ctx.last_sync()?;

    let status = if !is_online {
        SyncStatus::Offline
    } else if failed_count > 0 {
        SyncStatus::Error
    } else if pending_count > 0 {
        SyncStatus::Pending
    } else {
        SyncStatus::Synced
    };

    Ok(SyncStats {
        is_online,
        status,
        pending_count,
        failed_count,
        cached_work_orders,
        last_sync,
    })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
