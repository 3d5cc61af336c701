// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mlrs - offline-first sync agent library for field maintenance work.
//!
//! This crate provides the functionality behind the `mule` CLI tool: a
//! durable mutation queue over SQLite, a work-order snapshot cache, and a
//! background agent that drains the queue whenever the link is up.
//!
//! # Main Components
//!
//! - [`Config`] - Workspace configuration (`.mule/config.toml`)
//! - [`error`] - Error types for all operations
//! - The store itself lives in `ml-core`; drain scheduling in `ml-sync`
//!
//! # Initialization
//!
//! Use [`init_work_dir`] to create a new `.mule/` directory, then open the
//! store through the config:
//!
//! ```rust,ignore
//! use mlrs::{find_work_dir, get_db_path, init_work_dir, Config};
//!
//! // Initialize a new workspace
//! let work_dir = init_work_dir(Path::new("."))?;
//!
//! // Later, find and open an existing workspace
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let db_path = get_db_path(&work_dir, &config);
//! ```

mod cli;
pub mod colors;
mod commands;
mod daemon;
mod display;
mod env;
pub mod help;

pub mod config;
pub mod error;

pub use cli::{CacheCommand, Cli, Command, DaemonCommand, NetCommand, QueueCommand};
pub use config::{find_work_dir, get_daemon_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Enqueue { kind, work_order_id, data, file } => {
            commands::enqueue::run(kind, work_order_id, data, file)
        }
        Command::Status { json } => commands::status::run(json),
        Command::Sync { json } => commands::sync::run(json),
        Command::Queue(cmd) => match cmd {
            QueueCommand::List { failed, json } => commands::queue::list(failed, json),
            QueueCommand::Show { id, json } => commands::queue::show(&id, json),
            QueueCommand::Rm { id } => commands::queue::rm(&id),
        },
        Command::Cache(cmd) => match cmd {
            CacheCommand::Add { data, file } => commands::cache::add(data, file),
            CacheCommand::Show { id, json } => commands::cache::show(&id, json),
            CacheCommand::Has { id } => commands::cache::has(&id),
            CacheCommand::List { json } => commands::cache::list(json),
            CacheCommand::Sweep => commands::cache::sweep(),
            CacheCommand::Rm { id } => commands::cache::rm(&id),
        },
        Command::Net(cmd) => match cmd {
            NetCommand::Up => commands::net::run(true),
            NetCommand::Down => commands::net::run(false),
        },
        Command::Init { path } => commands::init::run(path),
        Command::Daemon(cmd) => match cmd {
            DaemonCommand::Start { foreground } => commands::daemon::start(foreground),
            DaemonCommand::Stop => commands::daemon::stop(),
            DaemonCommand::Status => commands::daemon::status(),
            DaemonCommand::Logs { follow } => commands::daemon::logs(follow),
            DaemonCommand::Run { daemon_dir, work_dir } => {
                let config = config::Config::load(&work_dir)?;
                daemon::run_daemon(&daemon_dir, &work_dir, &config)
            }
        },
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "mule", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
