// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `mule queue` subcommands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

fn enqueue(temp: &TempDir, kind: &str, wo: &str) {
    mule()
        .args(["enqueue", kind, wo, "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success();
}

fn first_item_id(temp: &TempDir) -> String {
    let output = mule()
        .args(["queue", "list", "--json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    items[0]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// queue list
// =============================================================================

#[test]
fn empty_queue_prints_placeholder() {
    let temp = init_temp();

    mule()
        .args(["queue", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty."));
}

#[test]
fn list_shows_kind_status_and_work_order() {
    let temp = init_temp();
    enqueue(&temp, "photo", "wo-42");

    mule()
        .args(["queue", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("- [photo] (pending)"))
        .stdout(predicate::str::contains("-> wo-42"));
}

#[test]
fn list_preserves_enqueue_order() {
    let temp = init_temp();
    enqueue(&temp, "photo", "wo-first");
    enqueue(&temp, "checklist", "wo-second");

    let output = mule()
        .args(["queue", "list"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.find("wo-first").unwrap();
    let second = stdout.find("wo-second").unwrap();
    assert!(first < second, "expected FIFO listing order:\n{}", stdout);
}

#[test]
fn list_json_returns_array_of_items() {
    let temp = init_temp();
    enqueue(&temp, "photo", "wo-1");
    enqueue(&temp, "documentation", "wo-2");

    let output = mule()
        .args(["queue", "list", "--json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], serde_json::json!("photo"));
    assert_eq!(items[0]["status"], serde_json::json!("pending"));
    assert_eq!(items[1]["work_order_id"], serde_json::json!("wo-2"));
}

#[test]
fn list_failed_on_clean_queue_prints_placeholder() {
    let temp = init_temp();
    enqueue(&temp, "photo", "wo-1");

    mule()
        .args(["queue", "list", "--failed"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No failed items."));
}

// =============================================================================
// queue show
// =============================================================================

#[test]
fn show_prints_item_details() {
    let temp = init_temp();
    enqueue(&temp, "checklist", "wo-7");
    let id = first_item_id(&temp);

    mule()
        .args(["queue", "show", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Work order: wo-7"))
        .stdout(predicate::str::contains("Status: pending"))
        .stdout(predicate::str::contains("Payload:"));
}

#[test]
fn show_unknown_id_fails() {
    let temp = init_temp();

    mule()
        .args(["queue", "show", "mu-deadbeef"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue item not found: mu-deadbeef"));
}

// =============================================================================
// queue rm
// =============================================================================

#[test]
fn rm_deletes_the_item() {
    let temp = init_temp();
    enqueue(&temp, "photo", "wo-3");
    let id = first_item_id(&temp);

    mule()
        .args(["queue", "rm", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Removed {}.", id)));

    mule()
        .args(["queue", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty."));
}

#[test]
fn rm_unknown_id_fails() {
    let temp = init_temp();

    mule()
        .args(["queue", "rm", "mu-00000000"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue item not found"));
}
