// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-level configuration for the daemon binary.

use std::path::PathBuf;
use std::time::Duration;

use rollout_core::UpdateConfig;

use crate::env;
use crate::error::DaemonError;

/// Loaded once at startup from environment variables, with defaults.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub state_dir: PathBuf,
    pub log_path: PathBuf,
    pub log_level: String,
    pub tick_workers: usize,
    pub default_batch_size: u32,
    pub poll_interval: Duration,
}

impl DaemonConfig {
    /// Uses fixed paths under `~/.local/state/rollout/` (or
    /// `$XDG_STATE_HOME/rollout/`), mirroring the reference system's
    /// single-daemon-per-user layout.
    pub fn load() -> Result<Self, DaemonError> {
        let state_dir = env::state_dir()?;
        Ok(DaemonConfig {
            log_path: state_dir.join("rollout-daemon.log"),
            log_level: env::log_level(),
            tick_workers: env::tick_workers(),
            default_batch_size: env::default_batch_size(),
            poll_interval: Duration::from_millis(env::poll_interval_ms()),
            state_dir,
        })
    }

    /// Default batching/failure knobs for an update admitted without its
    /// own explicit config.
    pub fn default_update_config(&self) -> UpdateConfig {
        UpdateConfig {
            batch_size: self.default_batch_size,
            max_failure_instances: 0,
            max_instance_attempts: 3,
            rollback_on_failure: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
