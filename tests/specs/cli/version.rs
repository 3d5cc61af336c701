// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Version flag specs.
//!
//! `-v` is the primary short flag; `-V` is a hidden alias kept for muscle
//! memory from other tools.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;
use yare::parameterized;

// =============================================================================
// Version flag output
// =============================================================================

#[parameterized(
    long_version = { "--version" },
    short_v = { "-v" },
    silent_v = { "-V" },
)]
fn version_flag_outputs_version(flag: &str) {
    mule()
        .arg(flag)
        .assert()
        .success()
        .stdout(predicate::str::contains("mule"))
        .stdout(predicate::str::is_match(r"[0-9]+\.[0-9]+\.[0-9]+").unwrap());
}

// =============================================================================
// Output equivalence
// =============================================================================

#[test]
fn v_and_version_produce_identical_output() {
    let v_output = mule().arg("-v").output().unwrap();
    let version_output = mule().arg("--version").output().unwrap();

    let v_stdout = String::from_utf8_lossy(&v_output.stdout);
    let version_stdout = String::from_utf8_lossy(&version_output.stdout);

    assert_eq!(
        v_stdout, version_stdout,
        "-v and --version should produce identical output"
    );
}

#[test]
fn big_v_produces_same_output_as_small_v() {
    let v_output = mule().arg("-v").output().unwrap();
    let big_v_output = mule().arg("-V").output().unwrap();

    let v_stdout = String::from_utf8_lossy(&v_output.stdout);
    let big_v_stdout = String::from_utf8_lossy(&big_v_output.stdout);

    assert_eq!(
        v_stdout, big_v_stdout,
        "-V and -v should produce identical output"
    );
}

// =============================================================================
// Help documentation
// =============================================================================

#[test]
fn version_flags_documented_in_help() {
    mule()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-v"))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn big_v_not_documented_in_help() {
    let output = mule().arg("--help").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    // The alias stays hidden: no " -V," / " -V " / "[-V" anywhere in help.
    assert!(
        !stdout.contains(" -V,"),
        "-V should not be documented in help"
    );
    assert!(
        !stdout.contains(" -V "),
        "-V should not be documented in help"
    );
    assert!(
        !stdout.contains("[-V"),
        "-V should not be documented in help"
    );
}

// =============================================================================
// Negative tests
// =============================================================================

#[test]
fn version_subcommand_does_not_exist() {
    mule().arg("version").assert().failure();
}
