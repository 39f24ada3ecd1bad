// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type for the engine runtime, composed from the crates it wraps.

use rollout_adapters::AdapterError;
use rollout_core::CoreError;
use rollout_storage::StorageError;
use thiserror::Error;

/// Errors that can occur while running an update tick.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// The tick was cancelled mid-suspension; no partial writeback beyond
    /// what prior steps already flushed atomically.
    #[error("tick cancelled")]
    Cancelled,
}

impl RuntimeError {
    pub fn is_not_found_like(&self) -> bool {
        match self {
            RuntimeError::Core(e) => e.is_not_found_like(),
            RuntimeError::Storage(e) => e.is_not_found_like(),
            _ => false,
        }
    }
}
