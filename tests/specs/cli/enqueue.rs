// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `mule enqueue` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;
use yare::parameterized;

// =============================================================================
// Happy path
// =============================================================================

#[test]
fn enqueue_with_inline_data() {
    let temp = init_temp();

    mule()
        .args(["enqueue", "photo", "wo-42", "--data", r#"{"path":"pump.jpg"}"#])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued mu-"))
        .stdout(predicate::str::contains("(photo) for wo-42"));
}

#[parameterized(
    photo = { "photo", "photo" },
    checklist = { "checklist", "checklist" },
    documentation = { "documentation", "documentation" },
    work_order_update = { "work_order_update", "work_order_update" },
    hyphenated_alias = { "work-order-update", "work_order_update" },
)]
fn enqueue_accepts_every_kind(kind: &str, displayed: &str) {
    let temp = init_temp();

    mule()
        .args(["enqueue", kind, "wo-7", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("({}) for wo-7", displayed)));
}

#[test]
fn enqueue_from_file() {
    let temp = init_temp();
    std::fs::write(temp.path().join("payload.json"), r#"{"step": 3, "done": true}"#).unwrap();

    mule()
        .args(["enqueue", "checklist", "wo-9", "--file", "payload.json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued mu-"));
}

#[test]
fn enqueue_from_stdin() {
    let temp = init_temp();

    mule()
        .args(["enqueue", "documentation", "wo-3", "--file", "-"])
        .current_dir(temp.path())
        .write_stdin(r#"{"note": "replaced bearing"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued mu-"));
}

#[test]
fn enqueued_items_survive_process_exit() {
    let temp = init_temp();

    mule()
        .args(["enqueue", "photo", "wo-42", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .success();

    // A separate process sees the item
    mule()
        .args(["queue", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("wo-42"));
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn enqueue_rejects_unknown_kind() {
    let temp = init_temp();

    mule()
        .args(["enqueue", "video", "wo-42", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid mutation kind"))
        .stderr(predicate::str::contains("photo, checklist, documentation"));
}

#[test]
fn enqueue_rejects_malformed_payload() {
    let temp = init_temp();

    mule()
        .args(["enqueue", "photo", "wo-42", "--data", "{not json"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid payload"));
}

#[test]
fn enqueue_rejects_data_and_file_together() {
    let temp = init_temp();

    mule()
        .args(["enqueue", "photo", "wo-42", "--data", "{}", "--file", "p.json"])
        .current_dir(temp.path())
        .assert()
        .failure();
}

#[test]
fn enqueue_outside_workspace_fails() {
    let temp = TempDir::new().unwrap();

    mule()
        .args(["enqueue", "photo", "wo-42", "--data", "{}"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}
