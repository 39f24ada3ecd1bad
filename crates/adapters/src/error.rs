// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type for the adapters crate, composed from [`rollout_core::CoreError`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error(transparent)]
    Core(#[from] rollout_core::CoreError),
}
