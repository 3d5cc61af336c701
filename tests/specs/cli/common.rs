// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn mule() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("mule").unwrap()
}

/// Helper to create an initialized temp workspace.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    mule()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Rewrite the workspace config with a fast transport so sync passes
/// finish in milliseconds instead of the default half second per item.
pub fn write_fast_config(temp: &TempDir) {
    write_config(temp, true);
}

/// Rewrite the workspace config with a fast transport and the link
/// assumed down at startup.
pub fn write_offline_config(temp: &TempDir) {
    write_config(temp, false);
}

fn write_config(temp: &TempDir, assume_online: bool) {
    let config_path = temp.path().join(".mule").join("config.toml");
    let contents = format!(
        "[sync]\ntransport_delay_ms = 25\n\n[net]\nassume_online = {}\n",
        assume_online
    );
    std::fs::write(config_path, contents).unwrap();
}
