// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persistent pod event log, keyed by (job, instance).
//!
//! Out of scope for real backing (see [`crate::job_store`]); a test-support
//! fake is provided so the mutation dispatcher's run-id recovery path can be
//! exercised without a database.

use async_trait::async_trait;
use rollout_core::{CoreError, JobId, PodEvent};

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Pod events for one instance, newest first.
    async fn get_pod_events(
        &self,
        job_id: &JobId,
        instance_id: u32,
    ) -> Result<Vec<PodEvent>, CoreError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTaskStore;

#[cfg(test)]
#[path = "task_store_tests.rs"]
mod tests;
