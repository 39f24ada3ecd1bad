// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persistent store of job configs, keyed by (job, version).
//!
//! The real backing (a database) is out of scope for this crate; only the
//! trait and a test-support fake are provided. The update-run pipeline only
//! ever reads one version per tick, so the interface stays single-method.

use async_trait::async_trait;
use rollout_core::{ConfigAddOn, CoreError, JobConfig, JobId};

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch the job config pinned at `version`, plus its opaque add-on
    /// (changelog etc.), threaded through unchanged to `JobCache::update`.
    async fn get_job_config_with_version(
        &self,
        job_id: &JobId,
        version: u64,
    ) -> Result<(JobConfig, ConfigAddOn), CoreError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeJobStore;

#[cfg(test)]
#[path = "job_store_tests.rs"]
mod tests;
