// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake resource-manager client for deterministic testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rollout_core::CoreError;

use super::{ResMgrClient, TaskLaunchInfo};

/// Records every batch it was asked to enqueue, in call order.
#[derive(Clone, Default)]
pub struct FakeResMgrClient {
    inner: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    batches: Vec<Vec<TaskLaunchInfo>>,
    error: Option<CoreError>,
}

impl FakeResMgrClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next (and all subsequent) `enqueue_tasks` calls fail.
    pub fn fail_with(&self, error: CoreError) {
        self.inner.lock().error = Some(error);
    }

    /// All task infos submitted across every call, flattened in order.
    pub fn submitted(&self) -> Vec<TaskLaunchInfo> {
        self.inner
            .lock()
            .batches
            .iter()
            .flat_map(|b| b.iter().cloned())
            .collect()
    }

    pub fn batch_count(&self) -> usize {
        self.inner.lock().batches.len()
    }
}

#[async_trait]
impl ResMgrClient for FakeResMgrClient {
    async fn enqueue_tasks(&self, tasks: Vec<TaskLaunchInfo>) -> Result<(), CoreError> {
        let mut inner = self.inner.lock();
        if let Some(err) = &inner.error {
            return Err(err.clone());
        }
        if tasks.is_empty() {
            return Ok(());
        }
        inner.batches.push(tasks);
        Ok(())
    }
}
