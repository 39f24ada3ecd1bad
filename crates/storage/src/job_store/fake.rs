// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`JobStore`] for deterministic testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rollout_core::{ConfigAddOn, CoreError, JobConfig, JobId};

use super::JobStore;

#[derive(Clone, Default)]
pub struct FakeJobStore {
    inner: Arc<Mutex<HashMap<(JobId, u64), (JobConfig, ConfigAddOn)>>>,
}

impl FakeJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a config version so `get_job_config_with_version` can find it.
    pub fn seed(&self, config: JobConfig, add_on: ConfigAddOn) {
        self.inner
            .lock()
            .insert((config.job_id.clone(), config.version), (config, add_on));
    }
}

#[async_trait]
impl JobStore for FakeJobStore {
    async fn get_job_config_with_version(
        &self,
        job_id: &JobId,
        version: u64,
    ) -> Result<(JobConfig, ConfigAddOn), CoreError> {
        self.inner
            .lock()
            .get(&(job_id.clone(), version))
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("job config {job_id}@{version}")))
    }
}
