// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type for the storage crate, composed from [`rollout_core::CoreError`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error(transparent)]
    Core(#[from] rollout_core::CoreError),
}

impl StorageError {
    pub fn is_not_found_like(&self) -> bool {
        match self {
            StorageError::Core(e) => e.is_not_found_like(),
        }
    }
}
