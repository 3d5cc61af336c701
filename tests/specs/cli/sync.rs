// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `mule sync` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

// =============================================================================
// Draining the queue
// =============================================================================

#[test]
fn sync_delivers_queued_items() {
    let temp = init_temp();
    write_fast_config(&temp);

    for wo in ["wo-1", "wo-2"] {
        mule()
            .args(["enqueue", "photo", wo, "--data", "{}"])
            .current_dir(temp.path())
            .assert()
            .success();
    }

    mule()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 2 of 2 item(s)"));

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending: 0"))
        .stdout(predicate::str::contains("Status: synced"));
}

#[test]
fn empty_queue_reports_nothing_to_sync() {
    let temp = init_temp();
    write_fast_config(&temp);

    mule()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to sync."));
}

#[test]
fn completed_sync_records_last_sync_time() {
    let temp = init_temp();
    write_fast_config(&temp);

    mule()
        .args(["enqueue", "documentation", "wo-9", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success();

    mule()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success();

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Last sync: never").not());
}

// =============================================================================
// Offline behavior
// =============================================================================

#[test]
fn sync_skips_when_link_is_down() {
    let temp = init_temp();
    write_offline_config(&temp);

    mule()
        .args(["enqueue", "photo", "wo-1", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success();

    mule()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync skipped: link is offline"));

    // The item stays queued for the next pass.
    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending: 1"));
}

// =============================================================================
// JSON output
// =============================================================================

#[test]
fn json_output_reports_drain_counters() {
    let temp = init_temp();
    write_fast_config(&temp);

    mule()
        .args(["enqueue", "checklist", "wo-3", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success();

    let output = mule()
        .args(["sync", "--json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["result"], serde_json::json!("Completed"));
    assert_eq!(outcome["attempted"], serde_json::json!(1));
    assert_eq!(outcome["delivered"], serde_json::json!(1));
    assert_eq!(outcome["failed"], serde_json::json!(0));
}

#[test]
fn json_output_reports_offline_skip() {
    let temp = init_temp();
    write_offline_config(&temp);

    let output = mule()
        .args(["sync", "--json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["result"], serde_json::json!("Offline"));
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn sync_outside_workspace_fails() {
    let temp = TempDir::new().unwrap();

    mule()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}
