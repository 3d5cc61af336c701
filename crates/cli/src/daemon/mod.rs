// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle and IPC plumbing for the background agent.
//!
//! The agent runs as a forked copy of the `mule` binary (`mule daemon run`)
//! and owns the store while it is alive. CLI processes talk to it over a
//! Unix socket in the daemon directory.

mod client;
mod lifecycle;
mod runner;

pub use client::DaemonClient;
pub use lifecycle::{
    detect_daemon, get_agent_status, get_socket_path, spawn_daemon, stop_daemon_forcefully,
    DaemonInfo,
};
pub use runner::run_daemon;
