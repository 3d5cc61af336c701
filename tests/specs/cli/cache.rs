// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `mule cache` subcommands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

fn cache_wo(temp: &TempDir, id: &str) {
    let snapshot = format!(r#"{{"id": "{}", "title": "Pump inspection"}}"#, id);
    mule()
        .args(["cache", "add", "--data", &snapshot])
        .current_dir(temp.path())
        .assert()
        .success();
}

// =============================================================================
// cache add / show
// =============================================================================

#[test]
fn add_prints_id_and_expiry() {
    let temp = init_temp();

    mule()
        .args(["cache", "add", "--data", r#"{"id": "wo-42"}"#])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cached wo-42 (expires"));
}

#[test]
fn add_reads_snapshot_from_stdin() {
    let temp = init_temp();

    mule()
        .args(["cache", "add", "--file", "-"])
        .current_dir(temp.path())
        .write_stdin(r#"{"id": "wo-55", "status": "open"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cached wo-55"));
}

#[test]
fn show_prints_snapshot_fields() {
    let temp = init_temp();
    cache_wo(&temp, "wo-42");

    mule()
        .args(["cache", "show", "wo-42"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Work order wo-42"))
        .stdout(predicate::str::contains("title"))
        .stdout(predicate::str::contains("Pump inspection"));
}

#[test]
fn show_json_round_trips_the_snapshot() {
    let temp = init_temp();
    cache_wo(&temp, "wo-9");

    let output = mule()
        .args(["cache", "show", "wo-9", "--json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let wo: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(wo["id"], serde_json::json!("wo-9"));
}

#[test]
fn show_missing_entry_fails() {
    let temp = init_temp();

    mule()
        .args(["cache", "show", "wo-404"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("work order not cached: wo-404"));
}

// =============================================================================
// cache has / list
// =============================================================================

#[test]
fn has_answers_yes_then_no() {
    let temp = init_temp();
    cache_wo(&temp, "wo-1");

    mule()
        .args(["cache", "has", "wo-1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("yes\n"));

    mule()
        .args(["cache", "has", "wo-2"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("no\n"));
}

#[test]
fn list_shows_entries_with_timestamps() {
    let temp = init_temp();
    cache_wo(&temp, "wo-42");

    mule()
        .args(["cache", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("- wo-42  cached"))
        .stdout(predicate::str::contains("expires"));
}

#[test]
fn empty_cache_prints_placeholder() {
    let temp = init_temp();

    mule()
        .args(["cache", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache is empty."));
}

// =============================================================================
// cache sweep / rm
// =============================================================================

#[test]
fn sweep_reports_eviction_count() {
    let temp = init_temp();
    cache_wo(&temp, "wo-1");

    // A fresh entry is inside its TTL, so nothing is evicted.
    mule()
        .args(["cache", "sweep"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Evicted 0 expired entries."));
}

#[test]
fn rm_drops_the_entry() {
    let temp = init_temp();
    cache_wo(&temp, "wo-8");

    mule()
        .args(["cache", "rm", "wo-8"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed wo-8 from cache."));

    mule()
        .args(["cache", "has", "wo-8"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("no\n"));
}

#[test]
fn rm_missing_entry_fails() {
    let temp = init_temp();

    mule()
        .args(["cache", "rm", "wo-404"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("work order not cached"));
}

// =============================================================================
// Snapshot validation
// =============================================================================

#[test]
fn add_rejects_non_object_snapshot() {
    let temp = init_temp();

    mule()
        .args(["cache", "add", "--data", "[1, 2, 3]"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a JSON object"));
}

#[test]
fn add_rejects_snapshot_without_id() {
    let temp = init_temp();

    mule()
        .args(["cache", "add", "--data", r#"{"title": "no id here"}"#])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a string \"id\" field"));
}
