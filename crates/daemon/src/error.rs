// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-crate error type: configuration and logging setup failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("ROLLOUT_STATE_DIR is unset and HOME could not be resolved")]
    NoStateDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
