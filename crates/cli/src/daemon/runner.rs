// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon runner: the agent main loop.
//!
//! The agent:
//! 1. Acquires a flock for the single instance guarantee
//! 2. Creates a Unix socket for IPC
//! 3. Owns the store and drains the queue whenever the link is up
//! 4. Sweeps expired cache entries on an interval

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use ml_core::SyncContext;
use ml_ipc::framing_async;
use ml_ipc::{AgentStatus, DaemonRequest, DaemonResponse};
use ml_sync::{Coordinator, LinkEvent, LinkMonitor, SimulatedTransport};
use tokio::net::UnixListener;
use tracing::{info, warn};

use crate::commands::sync::outcome_to_wire;
use crate::config::{get_db_path, Config};
use crate::env;
use crate::error::{Error, Result};

use super::lifecycle::{get_lock_path, get_pid_path, get_socket_path};

/// State shared with IPC handlers.
struct AgentState {
    coordinator: Arc<Coordinator<SimulatedTransport>>,
    monitor: LinkMonitor,
    shutdown: Arc<AtomicBool>,
    pid: u32,
    start_time: Instant,
    /// Delivery endpoint from config, echoed in status output.
    endpoint: Option<String>,
}

/// Run the agent for the given daemon and work directories.
///
/// This function blocks until shutdown is requested.
///
/// # Arguments
/// * `daemon_dir` - Directory for daemon files (socket, pid, lock, log)
/// * `work_dir` - The `.mule` directory whose store this agent owns
/// * `config` - Configuration loaded from the work directory
pub fn run_daemon(daemon_dir: &Path, work_dir: &Path, config: &Config) -> Result<()> {
    // The log file lives in the daemon directory, so it must exist first
    fs::create_dir_all(daemon_dir)?;
    setup_logging(&daemon_dir.join("daemon.log"));

    info!(
        "mule agent starting, daemon_dir={} work_dir={}",
        daemon_dir.display(),
        work_dir.display()
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))?;

    let result = rt.block_on(run_daemon_async(daemon_dir, work_dir, config));
    if let Err(ref e) = result {
        warn!("mule agent exiting with error: {}", e);
    }
    result
}

/// Route tracing output to the daemon log file, or stderr if it cannot
/// be opened. Filter level comes from MULE_LOG, default `info`.
fn setup_logging(log_path: &Path) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(env::vars::MULE_LOG).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(log_path) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Async implementation of the agent main loop.
async fn run_daemon_async(daemon_dir: &Path, work_dir: &Path, config: &Config) -> Result<()> {
    let lock_path = get_lock_path(daemon_dir);
    let socket_path = get_socket_path(daemon_dir);
    let pid_path = get_pid_path(daemon_dir);

    // Acquire the lock file with flock
    let lock_file = acquire_lock(&lock_path)?;

    // Write the PID file
    let pid = std::process::id();
    fs::write(&pid_path, pid.to_string())?;

    // Clean up any stale socket
    let _ = fs::remove_file(&socket_path);

    // Create the Unix socket listener
    let listener = UnixListener::bind(&socket_path)?;

    // Signal ready. IMPORTANT: do this early so the spawning CLI stops
    // waiting as soon as IPC is reachable.
    println!("READY");
    let _ = std::io::stdout().flush();

    // Open the store. In-flight items from a crashed pass are re-queued
    // inside Coordinator::new.
    let db_path = get_db_path(work_dir, config);
    let ctx = SyncContext::open(&db_path, config.retry_policy(), config.cache_ttl())?;

    let (monitor, mut link_rx) = LinkMonitor::new(config.net.assume_online);
    let transport = SimulatedTransport::new(config.transport_delay());
    let coordinator = Arc::new(Coordinator::new(ctx, transport, monitor.shared())?);

    // Startup housekeeping: evict entries that expired while we were down,
    // and drain anything a previous run left queued.
    match coordinator.sweep_cache().await {
        Ok(0) => {}
        Ok(evicted) => info!(evicted, "startup cache sweep"),
        Err(e) => warn!("startup cache sweep failed: {}", e),
    }
    if coordinator.is_online() {
        Arc::clone(&coordinator).spawn_drain();
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let state = AgentState {
        coordinator: Arc::clone(&coordinator),
        monitor,
        shutdown: Arc::clone(&shutdown),
        pid,
        start_time: Instant::now(),
        endpoint: config.sync.endpoint.clone(),
    };

    // First tick fires one full period from now, not immediately; the
    // startup sweep above already covered "now".
    let period = config.sweep_interval();
    let mut sweep = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

    info!(pid, "mule agent ready, socket={}", socket_path.display());

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        tokio::select! {
            result = listener.accept() => {
                if let Ok((stream, _)) = result {
                    let _ = handle_connection(stream, &state).await;
                }
            }

            Some(event) = link_rx.recv() => {
                match event {
                    LinkEvent::Up => {
                        info!("link up, starting drain");
                        Arc::clone(&state.coordinator).spawn_drain();
                    }
                    LinkEvent::Down => {
                        info!("link down");
                        let _ = state.coordinator.refresh_status().await;
                    }
                }
            }

            _ = sweep.tick() => {
                match state.coordinator.sweep_cache().await {
                    Ok(0) => {}
                    Ok(evicted) => info!(evicted, "cache sweep"),
                    Err(e) => warn!("cache sweep failed: {}", e),
                }
            }
        }
    }

    // Cleanup
    drop(lock_file);
    let _ = fs::remove_file(&socket_path);
    let _ = fs::remove_file(&pid_path);

    info!("mule agent stopped");
    Ok(())
}

/// Serve one client connection, handling requests until it hangs up.
async fn handle_connection(mut stream: tokio::net::UnixStream, state: &AgentState) -> Result<()> {
    loop {
        let request: DaemonRequest = match framing_async::read_message(&mut stream).await {
            Ok(request) => request,
            // EOF or framing error: the client is done
            Err(_) => break,
        };

        let response = handle_request(request, state).await;
        framing_async::write_message(&mut stream, &response).await?;

        if state.shutdown.load(Ordering::Relaxed) {
            break;
        }
    }
    Ok(())
}

/// Dispatch a single IPC request against the agent state.
async fn handle_request(request: DaemonRequest, state: &AgentState) -> DaemonResponse {
    match request {
        DaemonRequest::Ping => DaemonResponse::Pong,

        DaemonRequest::Hello { .. } => DaemonResponse::Hello {
            version: env!("CARGO_PKG_VERSION").to_string(),
        },

        DaemonRequest::Status => match state.coordinator.stats().await {
            Ok(stats) => DaemonResponse::Status(
                AgentStatus::new(state.pid, state.start_time.elapsed().as_secs(), stats)
                    .with_endpoint(state.endpoint.clone()),
            ),
            Err(e) => error_response(e),
        },

        DaemonRequest::SyncNow => match state.coordinator.sync_now().await {
            Ok(outcome) => DaemonResponse::SyncFinished { outcome: outcome_to_wire(outcome) },
            Err(e) => error_response(e),
        },

        DaemonRequest::Enqueue { kind, work_order_id, payload } => {
            match state.coordinator.enqueue(kind, &work_order_id, payload).await {
                Ok(item) => {
                    // Opportunistic drain; the item is already durable
                    if state.coordinator.is_online() {
                        Arc::clone(&state.coordinator).spawn_drain();
                    }
                    DaemonResponse::Enqueued { item }
                }
                Err(e) => error_response(e),
            }
        }

        DaemonRequest::CacheWorkOrder { work_order } => {
            match state.coordinator.cache_work_order(&work_order).await {
                Ok(entry) => DaemonResponse::CacheUpdated { expires_at: entry.expires_at },
                Err(e) => error_response(e),
            }
        }

        DaemonRequest::GetCachedWorkOrder { work_order_id } => DaemonResponse::CachedWorkOrder {
            work_order: state.coordinator.cached_work_order(&work_order_id).await,
        },

        DaemonRequest::IsWorkOrderCached { work_order_id } => DaemonResponse::Cached {
            value: state.coordinator.is_work_order_cached(&work_order_id).await,
        },

        DaemonRequest::SweepCache => match state.coordinator.sweep_cache().await {
            Ok(evicted) => DaemonResponse::SweepFinished { evicted: evicted as u64 },
            Err(e) => error_response(e),
        },

        DaemonRequest::SetLink { online } => {
            let changed = if online {
                state.monitor.set_online().await
            } else {
                state.monitor.set_offline().await
            };
            // Recompute the persisted status now so a follow-up status
            // request sees the transition even before the loop drains the
            // link event.
            let _ = state.coordinator.refresh_status().await;
            DaemonResponse::LinkChanged { online, changed }
        }

        DaemonRequest::Shutdown => {
            state.shutdown.store(true, Ordering::Relaxed);
            DaemonResponse::ShuttingDown
        }
    }
}

fn error_response(e: impl std::fmt::Display) -> DaemonResponse {
    DaemonResponse::Error { message: e.to_string() }
}

fn acquire_lock(lock_path: &Path) -> Result<File> {
    use fs2::FileExt;

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)?;

    // Exclusive, non-blocking: a second agent on the same directory bails
    // out instead of waiting.
    file.try_lock_exclusive()
        .map_err(|e| Error::Io(std::io::Error::other(format!("lock already held: {}", e))))?;

    Ok(file)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
