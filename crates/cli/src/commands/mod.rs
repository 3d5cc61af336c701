// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod cache;
pub mod daemon;
pub mod enqueue;
pub mod init;
pub mod net;
pub mod queue;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use ml_core::SyncContext;

use crate::config::{find_work_dir, get_daemon_dir, get_db_path, Config};
use crate::daemon::{get_socket_path, DaemonClient};
use crate::error::{Error, Result};

/// Locate the work directory and load its config.
pub fn load_workspace() -> Result<(Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    Ok((config, work_dir))
}

/// Open the store directly, bypassing any daemon.
pub fn open_store(work_dir: &Path, config: &Config) -> Result<SyncContext> {
    let db_path = get_db_path(work_dir, config);
    Ok(SyncContext::open(
        &db_path,
        config.retry_policy(),
        config.cache_ttl(),
    )?)
}

/// Helper to open the sync context from the current directory.
pub fn open_ctx() -> Result<(SyncContext, Config, PathBuf)> {
    let (config, work_dir) = load_workspace()?;
    let ctx = open_store(&work_dir, &config)?;
    Ok((ctx, config, work_dir))
}

/// Connect to a running daemon if its socket exists.
///
/// Returns `Ok(None)` when no daemon is reachable, so callers can fall
/// back to direct store access. A reachable daemon with a mismatched
/// version surfaces as an error, never as a silent fallback.
pub fn daemon_client(work_dir: &Path, config: &Config) -> Result<Option<DaemonClient>> {
    let daemon_dir = get_daemon_dir(work_dir, config);
    let socket_path = get_socket_path(&daemon_dir);
    if !socket_path.exists() {
        return Ok(None);
    }
    match DaemonClient::connect(&socket_path) {
        Ok(client) => Ok(Some(client)),
        Err(e @ Error::DaemonVersionMismatch { .. }) => Err(e),
        // Stale socket or half-dead daemon: treat as absent
        Err(_) => Ok(None),
    }
}

/// Read a JSON document from `--data`, `--file` (`-` for stdin), or stdin.
pub fn read_json_input(data: Option<&str>, file: Option<&str>) -> Result<serde_json::Value> {
    let raw = match (data, file) {
        (Some(inline), _) => inline.to_string(),
        (None, Some(path)) if path == "-" => std::io::read_to_string(std::io::stdin())?,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => std::io::read_to_string(std::io::stdin())?,
    };
    serde_json::from_str(raw.trim()).map_err(|e| Error::InvalidPayload(e.to_string()))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
