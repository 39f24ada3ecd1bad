// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;

use crate::error::DaemonError;

/// Resolve state directory: ROLLOUT_STATE_DIR > XDG_STATE_HOME/rollout > ~/.local/state/rollout
pub fn state_dir() -> Result<PathBuf, DaemonError> {
    if let Ok(dir) = std::env::var("ROLLOUT_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("rollout"));
    }
    let home = std::env::var("HOME").map_err(|_| DaemonError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/rollout"))
}

/// Number of concurrent tick workers polling the scheduler.
pub fn tick_workers() -> usize {
    std::env::var("ROLLOUT_TICK_WORKERS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(4)
}

/// Fallback `UpdateConfig::batch_size` for newly admitted updates that don't
/// specify one; does not affect an update's own stored config (`0` there
/// keeps meaning "no batching", per `diff_planner::plan`).
pub fn default_batch_size() -> u32 {
    std::env::var("ROLLOUT_DEFAULT_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(25)
}

/// `tracing_subscriber::EnvFilter` directive, e.g. "info" or "debug".
pub fn log_level() -> String {
    std::env::var("ROLLOUT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

/// Poll interval between scheduler sweeps.
pub fn poll_interval_ms() -> u64 {
    std::env::var("ROLLOUT_POLL_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(250)
}
