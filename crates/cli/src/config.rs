// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Agent configuration management.
//!
//! Configuration is stored in `.mule/config.toml` and covers the retry
//! policy, the cache TTL, the simulated transport, and the link's assumed
//! startup state.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ml_core::RetryPolicy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".mule";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "agent.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Agent configuration stored in `.mule/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Mutation delivery settings.
    #[serde(default)]
    pub sync: SyncConfig,
    /// Work-order cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Network link settings.
    #[serde(default)]
    pub net: NetConfig,
    /// Optional path for the database (relative to project root or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

/// Mutation delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Drain attempts per item before it is parked as exhausted (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backend endpoint the agent reports in status output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Simulated per-item delivery delay in milliseconds (default: 500).
    #[serde(default = "default_transport_delay_ms")]
    pub transport_delay_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            max_retries: default_max_retries(),
            endpoint: None,
            transport_delay_ms: default_transport_delay_ms(),
        }
    }
}

/// Work-order cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Hours a cached work order stays fresh (default: 24).
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Seconds between background eviction sweeps (default: 3600).
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl_hours: default_ttl_hours(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Network link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetConfig {
    /// Link state assumed at startup, before any `mule net` command (default: true).
    #[serde(default = "default_assume_online")]
    pub assume_online: bool,
}

impl Default for NetConfig {
    fn default() -> Self {
        NetConfig {
            assume_online: default_assume_online(),
        }
    }
}

fn default_max_retries() -> u32 {
    ml_core::DEFAULT_MAX_RETRIES
}

fn default_transport_delay_ms() -> u64 {
    500
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

fn default_assume_online() -> bool {
    true
}

impl Config {
    /// Loads configuration from the given `.mule/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given `.mule/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Retry policy derived from `[sync] max_retries`.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.sync.max_retries)
    }

    /// Cache TTL derived from `[cache] ttl_hours`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_hours * 60 * 60)
    }

    /// Simulated transport delay derived from `[sync] transport_delay_ms`.
    pub fn transport_delay(&self) -> Duration {
        Duration::from_millis(self.sync.transport_delay_ms)
    }

    /// Background sweep cadence derived from `[cache] sweep_interval_secs`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache.sweep_interval_secs)
    }
}

/// Find the .mule directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path from config
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.workspace {
        Some(workspace) => {
            let workspace_path = Path::new(workspace);
            if workspace_path.is_absolute() {
                workspace_path.join(DB_FILE_NAME)
            } else {
                // Relative to work_dir's parent (the project root)
                work_dir
                    .parent()
                    .unwrap_or(work_dir)
                    .join(workspace)
                    .join(DB_FILE_NAME)
            }
        }
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Get the directory for daemon files (socket, pid, lock, log).
/// This is the same directory where the database is stored.
pub fn get_daemon_dir(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.workspace {
        Some(workspace) => {
            let workspace_path = Path::new(workspace);
            if workspace_path.is_absolute() {
                workspace_path.to_path_buf()
            } else {
                // Relative to work_dir's parent (the project root)
                work_dir.parent().unwrap_or(work_dir).join(workspace)
            }
        }
        None => work_dir.to_path_buf(),
    }
}

/// Initialize a new .mule directory at the given path
pub fn init_work_dir(path: &Path) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;

    let config = Config::default();
    config.save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

/// Write a .gitignore file to the work directory.
///
/// The database and the daemon's runtime files never belong in version
/// control; the config file does.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let gitignore_path = work_dir.join(GITIGNORE_FILE_NAME);

    let content = "\
# Local queue and cache state
agent.db
agent.db-wal
agent.db-shm

# Daemon runtime files
daemon.log
daemon.sock
daemon.pid
daemon.lock
";

    fs::write(&gitignore_path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
