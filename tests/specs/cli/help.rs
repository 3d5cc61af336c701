// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help output specs.
//!
//! Wired as a standalone test target so it can run without the rest of the
//! spec suite.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn mule() -> Command {
    cargo_bin_cmd!("mule")
}

// =============================================================================
// Basic help
// =============================================================================

#[test]
fn mule_without_arguments_shows_help() {
    // A bare invocation prints the full help on stderr and exits non-zero.
    mule()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"))
        .stderr(predicate::str::contains("enqueue"))
        .stderr(predicate::str::contains("daemon"));
}

#[test]
fn help_lists_command_sections_in_order() {
    let output = mule().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let queue_section = stdout
        .find("Queue & Sync:")
        .expect("help should have a Queue & Sync section");
    let agent_section = stdout
        .find("Setup & Agent:")
        .expect("help should have a Setup & Agent section");
    assert!(
        queue_section < agent_section,
        "Queue & Sync should come before Setup & Agent"
    );
}

#[test]
fn help_displays_usage_and_commands() {
    let output = mule().arg("help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.is_empty());
    assert!(stdout.len() > 100, "Help output should be substantial");

    mule()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mule"))
        .stdout(predicate::str::contains("Offline-first"))
        .stdout(predicate::str::contains("enqueue"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("cache"))
        .stdout(predicate::str::contains("daemon"));
}

#[test]
fn help_shows_quickstart_examples() {
    mule()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Get started:"))
        .stdout(predicate::str::contains("mule init"))
        .stdout(predicate::str::contains("mule enqueue photo wo-42"))
        .stdout(predicate::str::contains("mule daemon start"));
}

// =============================================================================
// Help flags
// =============================================================================

#[test]
fn help_and_h_flags_work() {
    mule()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mule"))
        .stdout(predicate::str::contains("Options:"));

    mule()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Offline-first"));
}

#[test]
fn h_and_help_produce_same_output() {
    let h_output = mule().args(["status", "-h"]).output().unwrap();
    let help_output = mule().args(["status", "--help"]).output().unwrap();

    let h_stdout = String::from_utf8_lossy(&h_output.stdout);
    let help_stdout = String::from_utf8_lossy(&help_output.stdout);

    assert_eq!(
        h_stdout, help_stdout,
        "-h and --help should produce identical output"
    );
}

// =============================================================================
// Command help
// =============================================================================

#[yare::parameterized(
    enqueue = { "enqueue" },
    status = { "status" },
    sync = { "sync" },
    queue = { "queue" },
    cache = { "cache" },
    net = { "net" },
    init = { "init" },
    daemon = { "daemon" },
    completion = { "completion" },
)]
fn command_supports_h_flag(cmd: &str) {
    mule()
        .args([cmd, "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains(cmd));
}

#[test]
fn queue_help_lists_subcommands() {
    mule()
        .args(["queue", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("rm"));
}

#[test]
fn enqueue_help_shows_examples() {
    mule()
        .args(["enqueue", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Examples:"));
}

// =============================================================================
// Plain output off a terminal
// =============================================================================

#[test]
fn help_has_no_ansi_escapes_when_piped() {
    let output = mule().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains('\x1b'),
        "piped help output should not carry ANSI escapes"
    );
}
