// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`TaskStore`] for deterministic testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rollout_core::{CoreError, JobId, PodEvent};

use super::TaskStore;

#[derive(Clone, Default)]
pub struct FakeTaskStore {
    inner: Arc<Mutex<HashMap<(JobId, u32), Vec<PodEvent>>>>,
}

impl FakeTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the pod event history (newest first) for one instance.
    pub fn seed(&self, job_id: &JobId, instance_id: u32, events: Vec<PodEvent>) {
        self.inner
            .lock()
            .insert((job_id.clone(), instance_id), events);
    }
}

#[async_trait]
impl TaskStore for FakeTaskStore {
    async fn get_pod_events(
        &self,
        job_id: &JobId,
        instance_id: u32,
    ) -> Result<Vec<PodEvent>, CoreError> {
        Ok(self
            .inner
            .lock()
            .get(&(job_id.clone(), instance_id))
            .cloned()
            .unwrap_or_default())
    }
}
