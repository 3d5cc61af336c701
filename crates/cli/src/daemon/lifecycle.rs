// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: spawn, detect, cleanup.
//!
//! The agent is spawned as a background `mule daemon run` process and
//! communicates via Unix socket. PID, socket, and lock files live in the
//! daemon directory (the `.mule/` work directory by default).

use std::fs;
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use ml_ipc::framing;
use ml_ipc::{AgentStatus, DaemonRequest, DaemonResponse};

use crate::env;
use crate::error::{Error, Result};

/// Socket filename within the daemon directory.
const SOCKET_NAME: &str = "daemon.sock";
/// PID filename within the daemon directory.
const PID_NAME: &str = "daemon.pid";
/// Lock filename for the single instance guarantee.
const LOCK_NAME: &str = "daemon.lock";

/// Information about a running daemon.
#[derive(Debug, Clone)]
pub struct DaemonInfo {
    /// Process ID of the daemon.
    pub pid: u32,
}

/// Get the socket path for the given daemon directory.
pub fn get_socket_path(daemon_dir: &Path) -> PathBuf {
    daemon_dir.join(SOCKET_NAME)
}

/// Get the PID file path for the given daemon directory.
pub fn get_pid_path(daemon_dir: &Path) -> PathBuf {
    daemon_dir.join(PID_NAME)
}

/// Get the lock file path for the given daemon directory.
pub fn get_lock_path(daemon_dir: &Path) -> PathBuf {
    daemon_dir.join(LOCK_NAME)
}

/// Detect if a daemon is running for the given daemon directory.
///
/// Returns Some(DaemonInfo) if a daemon is running and responding,
/// None otherwise. Cleans up stale PID/socket files if found.
pub fn detect_daemon(daemon_dir: &Path) -> Result<Option<DaemonInfo>> {
    let socket_path = get_socket_path(daemon_dir);
    let pid_path = get_pid_path(daemon_dir);

    if !socket_path.exists() {
        // No socket, clean up a stale PID file if one is left over
        if pid_path.exists() {
            let _ = fs::remove_file(&pid_path);
        }
        return Ok(None);
    }

    // Try to connect and ping
    match UnixStream::connect(&socket_path) {
        Ok(mut stream) => {
            let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
            let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

            if framing::write_message(&mut stream, &DaemonRequest::Ping).is_err() {
                // Failed to write, daemon is dead
                cleanup_stale_files(daemon_dir);
                return Ok(None);
            }

            match framing::read_message(&mut stream) {
                Ok(DaemonResponse::Pong) => {
                    // Daemon is alive, read PID
                    match read_pid_file(&pid_path) {
                        Some(pid) if pid > 0 => Ok(Some(DaemonInfo { pid })),
                        // PID file missing or invalid, daemon may be starting up
                        _ => Ok(None),
                    }
                }
                _ => {
                    // Unexpected response or error
                    cleanup_stale_files(daemon_dir);
                    Ok(None)
                }
            }
        }
        Err(_) => {
            // Cannot connect, clean up stale files
            cleanup_stale_files(daemon_dir);
            Ok(None)
        }
    }
}

/// Get agent status by connecting to the daemon.
pub fn get_agent_status(daemon_dir: &Path) -> Result<Option<AgentStatus>> {
    let socket_path = get_socket_path(daemon_dir);

    if !socket_path.exists() {
        return Ok(None);
    }

    match UnixStream::connect(&socket_path) {
        Ok(mut stream) => {
            let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
            let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

            framing::write_message(&mut stream, &DaemonRequest::Status)?;

            match framing::read_message(&mut stream)? {
                DaemonResponse::Status(status) => Ok(Some(status)),
                DaemonResponse::Error { message } => Err(Error::Daemon(message)),
                other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
            }
        }
        Err(e) => {
            cleanup_stale_files(daemon_dir);
            Err(Error::Io(e))
        }
    }
}

/// Send a shutdown request to the daemon.
fn stop_daemon(daemon_dir: &Path) -> Result<()> {
    let socket_path = get_socket_path(daemon_dir);

    if !socket_path.exists() {
        return Err(Error::DaemonNotRunning);
    }

    let mut stream = UnixStream::connect(&socket_path)?;
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    framing::write_message(&mut stream, &DaemonRequest::Shutdown)?;

    match framing::read_message(&mut stream)? {
        DaemonResponse::ShuttingDown => Ok(()),
        DaemonResponse::Error { message } => Err(Error::Daemon(message)),
        other => Err(Error::Daemon(format!("unexpected response: {:?}", other))),
    }
}

/// Find the binary to run the agent loop.
///
/// The agent is the `mule` binary itself, re-executed with the hidden
/// `daemon run` subcommand.
fn find_daemon_binary() -> PathBuf {
    // 1. Explicit override
    if let Some(path) = env::daemon_binary() {
        return path;
    }

    // 2. Re-exec the current executable
    if let Ok(exe) = std::env::current_exe() {
        return exe;
    }

    // 3. Fall back to PATH
    PathBuf::from("mule")
}

/// Spawn a new daemon process for the given daemon and work directories.
///
/// Returns the DaemonInfo for the spawned daemon. The daemon itself takes
/// a flock so only one instance runs per daemon directory.
pub fn spawn_daemon(daemon_dir: &Path, work_dir: &Path) -> Result<DaemonInfo> {
    // Check if a daemon is already running
    if let Some(info) = detect_daemon(daemon_dir)? {
        return Ok(info);
    }

    fs::create_dir_all(daemon_dir)?;

    let binary = find_daemon_binary();

    let mut child = Command::new(&binary)
        .args(["daemon", "run"])
        .arg("--daemon-dir")
        .arg(daemon_dir)
        .arg("--work-dir")
        .arg(work_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            Error::Daemon(format!(
                "failed to start daemon ({}): {}",
                binary.display(),
                e
            ))
        })?;

    // Wait for the daemon to signal it's ready (writes "READY" to stdout)
    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines() {
            match line {
                Ok(line) if line == "READY" => break,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    }

    // Verify the daemon is running with short polling
    for _ in 0..150 {
        // A process exit here means startup failed
        if let Ok(Some(status)) = child.try_wait() {
            let stderr_output = if let Some(mut stderr) = child.stderr.take() {
                use std::io::Read;
                let mut output = String::new();
                let _ = stderr.read_to_string(&mut output);
                output
            } else {
                String::new()
            };
            return Err(Error::Daemon(format!(
                "daemon process exited with status: {}\n{}",
                status,
                stderr_output.trim()
            )));
        }

        if let Some(info) = detect_daemon(daemon_dir)? {
            return Ok(info);
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    Err(Error::Daemon(
        "daemon failed to start: could not connect after multiple attempts".to_string(),
    ))
}

/// Clean up stale socket and PID files.
fn cleanup_stale_files(daemon_dir: &Path) {
    let socket_path = get_socket_path(daemon_dir);
    let pid_path = get_pid_path(daemon_dir);

    let _ = fs::remove_file(&socket_path);
    let _ = fs::remove_file(&pid_path);
}

/// Read PID from the PID file.
fn read_pid_file(pid_path: &Path) -> Option<u32> {
    fs::read_to_string(pid_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Stop the daemon forcefully if graceful shutdown fails.
///
/// Tries a graceful shutdown first, then sends SIGKILL if needed.
pub fn stop_daemon_forcefully(daemon_dir: &Path) -> Result<()> {
    let pid_path = get_pid_path(daemon_dir);

    // Read the PID before the socket goes away
    let pid = read_pid_file(&pid_path);

    if stop_daemon(daemon_dir).is_ok() {
        // Wait for the daemon to actually exit
        if let Some(pid) = pid {
            wait_for_process_exit(pid, Duration::from_secs(1));
        }
        cleanup_stale_files(daemon_dir);
        return Ok(());
    }

    // Graceful shutdown failed; if we have a PID, send SIGKILL
    if let Some(pid) = pid {
        let _ = Command::new("kill").arg("-9").arg(pid.to_string()).output();
        std::thread::sleep(Duration::from_millis(100));
    }

    cleanup_stale_files(daemon_dir);

    Ok(())
}

/// Wait for a process to exit, with timeout.
fn wait_for_process_exit(pid: u32, timeout: Duration) {
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        let result = Command::new("kill").arg("-0").arg(pid.to_string()).output();

        match result {
            Ok(output) if !output.status.success() => return,
            Err(_) => return,
            _ => {}
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
