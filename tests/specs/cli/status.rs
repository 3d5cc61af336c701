// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `mule status` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

// =============================================================================
// Without a daemon
// =============================================================================

#[test]
fn fresh_workspace_reports_synced() {
    let temp = init_temp();

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Link: online"))
        .stdout(predicate::str::contains("Status: synced"))
        .stdout(predicate::str::contains("Pending: 0"))
        .stdout(predicate::str::contains("Failed: 0"))
        .stdout(predicate::str::contains("Cached work orders: 0"))
        .stdout(predicate::str::contains("Last sync: never"))
        .stdout(predicate::str::contains("Daemon: not running"));
}

#[test]
fn offline_config_reports_offline() {
    let temp = init_temp();
    write_offline_config(&temp);

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Link: offline"))
        .stdout(predicate::str::contains("Status: offline"));
}

#[test]
fn queued_items_flip_status_to_pending() {
    let temp = init_temp();

    for wo in ["wo-1", "wo-2"] {
        mule()
            .args(["enqueue", "photo", wo, "--data", "{}"])
            .current_dir(temp.path())
            .assert()
            .success();
    }

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: pending"))
        .stdout(predicate::str::contains("Pending: 2"));
}

#[test]
fn offline_outranks_pending() {
    let temp = init_temp();
    write_offline_config(&temp);

    mule()
        .args(["enqueue", "photo", "wo-1", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success();

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: offline"))
        .stdout(predicate::str::contains("Pending: 1"));
}

// =============================================================================
// JSON output
// =============================================================================

#[test]
fn json_output_parses_with_expected_fields() {
    let temp = init_temp();

    mule()
        .args(["enqueue", "checklist", "wo-5", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success();

    let output = mule()
        .args(["status", "--json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["is_online"], serde_json::json!(true));
    assert_eq!(stats["status"], serde_json::json!("pending"));
    assert_eq!(stats["pending_count"], serde_json::json!(1));
    assert_eq!(stats["failed_count"], serde_json::json!(0));
    assert_eq!(stats["cached_work_orders"], serde_json::json!(0));
    assert!(stats["last_sync"].is_null());
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn status_outside_workspace_fails() {
    let temp = TempDir::new().unwrap();

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"))
        .stderr(predicate::str::contains("mule init"));
}
