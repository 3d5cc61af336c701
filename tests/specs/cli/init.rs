// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `mule init` command.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

// =============================================================================
// Basic init
// =============================================================================

#[test]
fn creates_mule_directory_with_config_and_database() {
    let temp = TempDir::new().unwrap();

    mule()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized mule agent at"))
        .stdout(predicate::str::contains("Database:"));

    assert!(temp.path().join(".mule").exists());
    assert!(temp.path().join(".mule/config.toml").exists());
    assert!(temp.path().join(".mule/agent.db").exists());
}

#[test]
fn fails_if_already_initialized() {
    let temp = TempDir::new().unwrap();

    mule().arg("init").current_dir(temp.path()).assert().success();

    mule()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_with_path_argument() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("site-a");
    std::fs::create_dir(&target).unwrap();

    mule()
        .arg("init")
        .arg(target.to_str().unwrap())
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(target.join(".mule/config.toml").exists());
    // The current directory stays untouched
    assert!(!temp.path().join(".mule").exists());
}

// =============================================================================
// Generated files
// =============================================================================

#[test]
fn config_contains_default_sections() {
    let temp = init_temp();

    let config = std::fs::read_to_string(temp.path().join(".mule/config.toml")).unwrap();
    assert!(config.contains("[sync]"));
    assert!(config.contains("max_retries = 3"));
    assert!(config.contains("[cache]"));
    assert!(config.contains("ttl_hours = 24"));
    assert!(config.contains("[net]"));
    assert!(config.contains("assume_online = true"));
}

#[test]
fn gitignore_covers_runtime_files_but_not_config() {
    let temp = init_temp();

    let gitignore = std::fs::read_to_string(temp.path().join(".mule/.gitignore")).unwrap();
    for entry in ["agent.db", "agent.db-wal", "agent.db-shm", "daemon.log", "daemon.sock"] {
        assert!(gitignore.contains(entry), "missing {} in .gitignore", entry);
    }
    assert!(!gitignore.contains("config.toml"));
}

#[test]
fn initialized_workspace_accepts_commands() {
    let temp = init_temp();

    mule()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending: 0"));
}
