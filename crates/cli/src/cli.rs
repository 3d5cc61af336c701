// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface definitions for the mule binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ml_core::MutationKind;

use crate::{colors, help};

/// Reject empty or whitespace-only argument values.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parse a mutation kind, surfacing the valid set on error.
fn parse_kind(s: &str) -> Result<MutationKind, String> {
    s.parse::<MutationKind>().map_err(|e| e.to_string())
}

#[derive(Debug, Parser)]
#[command(name = "mule")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "Offline-first sync agent for field maintenance work")]
#[command(
    long_about = "mule queues work-order mutations while the link is down, keeps a TTL cache of work-order snapshots for offline viewing, and drains the queue to the backend when connectivity returns."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
#[command(arg_required_else_help = true)]
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Change to this directory before doing anything
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<String>,

    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    // ───────────────────────── Queue & Sync ─────────────────────────
    /// Queue a mutation for delivery to the backend
    #[command(arg_required_else_help = true)]
    #[command(after_help = colors::examples(
        "\
Examples:
  mule enqueue photo wo-42 --data '{\"path\":\"pump.jpg\"}'    Queue a photo upload
  mule enqueue checklist wo-42 --file steps.json             Read the payload from a file
  cat note.json | mule enqueue documentation wo-42           Read the payload from stdin

Kinds:
  Valid: photo, checklist, documentation, work_order_update"
    ))]
    Enqueue {
        /// Mutation kind (photo, checklist, documentation, work_order_update)
        #[arg(value_parser = parse_kind)]
        kind: MutationKind,

        /// Work order the mutation belongs to
        #[arg(value_parser = non_empty_string)]
        work_order_id: String,

        /// Inline JSON payload
        #[arg(long, conflicts_with = "file")]
        data: Option<String>,

        /// Read the payload from a file ('-' for stdin)
        #[arg(long)]
        file: Option<String>,
    },

    /// Show link, queue, and cache state
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a sync pass now
    Sync {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the mutation queue
    #[command(subcommand)]
    Queue(QueueCommand),

    /// Manage the offline work-order cache
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Drive the network link
    #[command(subcommand)]
    Net(NetCommand),

    // ───────────────────────── Setup & Agent ─────────────────────────
    /// Initialize the agent work directory
    Init {
        /// Directory to initialize (defaults to the current directory)
        path: Option<String>,
    },

    /// Manage the background agent
    #[command(subcommand)]
    Daemon(DaemonCommand),

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Subcommands for inspecting the mutation queue.
#[derive(Debug, Subcommand)]
pub enum QueueCommand {
    /// List queued mutations
    #[command(after_help = colors::examples(
        "\
Examples:
  mule queue list             List every queued mutation
  mule queue list --failed    Only mutations that have failed
  mule queue list --json      Machine-readable output"
    ))]
    List {
        /// Show only failed items
        #[arg(long)]
        failed: bool,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one queued mutation in detail
    #[command(arg_required_else_help = true)]
    Show {
        /// Queue item ID (e.g. mu-1a2b3c4d)
        #[arg(value_parser = non_empty_string)]
        id: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a queued mutation without delivering it
    #[command(arg_required_else_help = true)]
    Rm {
        /// Queue item ID (e.g. mu-1a2b3c4d)
        #[arg(value_parser = non_empty_string)]
        id: String,
    },
}

/// Subcommands for the offline work-order cache.
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Cache a work-order snapshot for offline viewing
    #[command(after_help = colors::examples(
        "\
Examples:
  mule cache add --data '{\"id\":\"wo-42\",\"title\":\"Fix pump\"}'    Cache an inline snapshot
  mule cache add --file wo-42.json                                Cache a snapshot from a file

Snapshots:
  Shape: a JSON object with an \"id\" field; all other fields are kept as-is"
    ))]
    Add {
        /// Inline JSON snapshot
        #[arg(long, conflicts_with = "file")]
        data: Option<String>,

        /// Read the snapshot from a file ('-' for stdin)
        #[arg(long)]
        file: Option<String>,
    },

    /// Show a cached work order
    #[command(arg_required_else_help = true)]
    Show {
        /// Work order ID
        #[arg(value_parser = non_empty_string)]
        id: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a work order is cached and fresh
    #[command(arg_required_else_help = true)]
    Has {
        /// Work order ID
        #[arg(value_parser = non_empty_string)]
        id: String,
    },

    /// List live cache entries
    List {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Evict expired entries now
    Sweep,

    /// Remove a cached work order
    #[command(arg_required_else_help = true)]
    Rm {
        /// Work order ID
        #[arg(value_parser = non_empty_string)]
        id: String,
    },
}

/// Subcommands driving the simulated network link.
#[derive(Debug, Subcommand)]
pub enum NetCommand {
    /// Mark the link online (triggers a drain)
    Up,

    /// Mark the link offline
    Down,
}

/// Subcommands for the background agent process.
#[derive(Debug, Subcommand)]
pub enum DaemonCommand {
    /// Start the background agent
    Start {
        /// Run in the foreground instead of spawning
        #[arg(long)]
        foreground: bool,
    },

    /// Stop the background agent
    Stop,

    /// Show agent process status
    Status,

    /// View agent logs
    Logs {
        /// Follow the log as it grows
        #[arg(long)]
        follow: bool,
    },

    /// Run the agent loop (internal, called by start)
    #[command(hide = true)]
    Run {
        /// Daemon directory (where socket/pid/lock files go)
        #[arg(long)]
        daemon_dir: PathBuf,

        /// Work directory for loading config (.mule)
        #[arg(long)]
        work_dir: PathBuf,
    },
}

#[cfg(test)]
#[path = "cli_tests/mod.rs"]
mod tests;
