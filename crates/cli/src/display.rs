// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use ml_core::{CacheEntry, ItemStatus, QueueItem, SyncStats, WorkOrder};

/// Maximum length of the error tail shown on queue list lines.
const ERROR_TAIL_WIDTH: usize = 50;

/// Format a timestamp for human output.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Format the last completed sync for status output.
pub fn format_last_sync(last_sync: Option<&DateTime<Utc>>) -> String {
    match last_sync {
        Some(ts) => format_timestamp(ts),
        None => "never".to_string(),
    }
}

/// Truncate an error message to fit on a single list line.
fn error_tail(error: &str) -> String {
    let flat = error.replace('\n', " ");
    if flat.len() <= ERROR_TAIL_WIDTH {
        flat
    } else {
        let cut: String = flat.chars().take(ERROR_TAIL_WIDTH).collect();
        format!("{}...", cut)
    }
}

/// Format a single queue item line for list output
pub fn format_item_line(item: &QueueItem) -> String {
    let status_display = match item.status {
        ItemStatus::Failed => format!("failed, retries {}", item.retry_count),
        other => other.to_string(),
    };
    let mut line = format!(
        "- [{}] ({}) {} -> {}",
        item.kind, status_display, item.id, item.work_order_id
    );
    if item.status == ItemStatus::Failed {
        if let Some(error) = &item.last_error {
            line.push_str(": ");
            line.push_str(&error_tail(error));
        }
    }
    line
}

/// Format queue item details for the show command
pub fn format_item_details(item: &QueueItem) -> String {
    let mut output = Vec::new();

    // Header: [kind] id
    output.push(format!("[{}] {}", item.kind, item.id));

    // Metadata on separate lines
    output.push(format!("Work order: {}", item.work_order_id));
    output.push(format!("Status: {}", item.status));
    output.push(format!("Retries: {}", item.retry_count));
    if let Some(error) = &item.last_error {
        output.push(format!("Last error: {}", error));
    }
    output.push(format!("Enqueued: {}", format_timestamp(&item.enqueued_at)));

    // Payload as indented pretty JSON
    output.push(String::new());
    output.push("Payload:".to_string());
    let payload =
        serde_json::to_string_pretty(&item.payload).unwrap_or_else(|_| item.payload.to_string());
    for line in payload.lines() {
        output.push(format!("  {}", line));
    }

    output.join("\n")
}

/// Format aggregate sync stats for status output
pub fn format_stats(stats: &SyncStats) -> String {
    let link = if stats.is_online { "online" } else { "offline" };
    let mut output = Vec::new();
    output.push(format!("Link: {}", link));
    output.push(format!("Status: {}", stats.status));
    output.push(format!("Pending: {}", stats.pending_count));
    output.push(format!("Failed: {}", stats.failed_count));
    output.push(format!("Cached work orders: {}", stats.cached_work_orders));
    output.push(format!(
        "Last sync: {}",
        format_last_sync(stats.last_sync.as_ref())
    ));
    output.join("\n")
}

/// Format a single cache entry line for list output
pub fn format_cache_line(entry: &CacheEntry) -> String {
    format!(
        "- {}  cached {}  expires {}",
        entry.work_order.id,
        format_timestamp(&entry.cached_at),
        format_timestamp(&entry.expires_at)
    )
}

/// Format a cached work order for the show command.
///
/// Fields come back sorted by key, so the output is stable across runs.
pub fn format_work_order(work_order: &WorkOrder) -> String {
    let mut output = Vec::new();
    output.push(format!("Work order {}", work_order.id));
    for (key, value) in &work_order.fields {
        let rendered =
            serde_json::to_string(value).unwrap_or_else(|_| value.to_string());
        output.push(format!("  {}: {}", key, rendered));
    }
    output.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
