// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the stores, caches, and the update-run engine.
//!
//! `NotFound`/`InstanceIdOutOfRange` are routine — the status confirmer
//! matches on them directly to reclassify a planned action. Everything else
//! is transient from the core's point of view: the tick aborts and the
//! outer goal-state engine retries with its own backoff.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The requested job, update, or task runtime does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The instance id is outside the job's current instance count.
    /// Equivalent to `NotFound` for planning purposes.
    #[error("instance id {0} exceeds instance count")]
    InstanceIdOutOfRange(u32),

    /// Any other store/cache/RPC failure. Retried by the caller.
    #[error("transient store error: {0}")]
    TransientStoreError(String),

    /// An internal consistency check failed (e.g. a runtime missing fields
    /// that should always be present). Logged and treated as transient.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl CoreError {
    /// Status-confirmer reclassification hinges on exactly these two kinds.
    pub fn is_not_found_like(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound(_) | CoreError::InstanceIdOutOfRange(_)
        )
    }
}
