// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use ml_core::Database;

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let work_dir = init_work_dir(&target_path)?;

    // Open the database once so the schema exists before any daemon
    // or inspection command touches it.
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    Database::open(&db_path)?;

    println!("Initialized mule agent at {}", work_dir.display());
    println!("Database: {}", db_path.display());

    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
