// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation specs.
//!
//! Wired as a standalone test target so it can run without the rest of the
//! spec suite.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

fn mule() -> Command {
    cargo_bin_cmd!("mule")
}

// =============================================================================
// Parameterized tests for shell completion generation
// =============================================================================

#[yare::parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_generates_non_empty_output(shell: &str) {
    let output = mule().args(["completion", shell]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.is_empty(), "Completion output should not be empty");
}

// =============================================================================
// Bash completion tests
// =============================================================================

#[test]
fn completion_bash_generates_valid_script() {
    let output = mule().args(["completion", "bash"]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("complete") || stdout.contains("_mule"),
        "Bash completion should contain completion commands"
    );
}

#[test]
fn completion_bash_references_commands() {
    let output = mule().args(["completion", "bash"]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
    let has_commands = stdout.contains("enqueue")
        || stdout.contains("sync")
        || stdout.contains("daemon")
        || stdout.contains("mule");

    assert!(
        has_commands,
        "Bash completion should reference mule commands"
    );
}

// =============================================================================
// Zsh completion tests
// =============================================================================

#[test]
fn completion_zsh_generates_valid_script() {
    let output = mule().args(["completion", "zsh"]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let has_zsh_syntax = stdout.contains("compdef")
        || stdout.contains("_arguments")
        || stdout.contains("_mule")
        || stdout.contains("#compdef");

    assert!(
        has_zsh_syntax,
        "Zsh completion should contain zsh-specific syntax"
    );
}

// =============================================================================
// Fish completion tests
// =============================================================================

#[test]
fn completion_fish_generates_valid_script() {
    let output = mule().args(["completion", "fish"]).output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("complete"),
        "Fish completion should contain 'complete' commands"
    );
}

// =============================================================================
// Error handling tests
// =============================================================================

#[test]
fn completion_without_shell_fails() {
    mule().arg("completion").assert().failure();
}

#[test]
fn completion_invalid_shell_fails() {
    mule()
        .args(["completion", "invalid_shell"])
        .assert()
        .failure();
}
