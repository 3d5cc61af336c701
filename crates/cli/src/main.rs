// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mule - offline-first sync agent for field maintenance work.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use mlrs::Cli;

fn main() {
    let cli = Cli::parse();

    // -C applies before any workspace discovery
    if let Some(dir) = cli.directory.as_deref() {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("error: cannot change to directory {}: {}", dir, e);
            std::process::exit(1);
        }
    }

    if let Err(e) = mlrs::run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
