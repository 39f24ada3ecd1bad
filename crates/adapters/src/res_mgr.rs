// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The resource-manager client: the external collaborator that admits newly
//! added task instances for placement. Out of scope beyond the interface
//! named in the update-run design (§6) — the real gRPC client is owned by a
//! different part of the system; only the trait and a test-support fake
//! live here.

use async_trait::async_trait;
use rollout_core::{CoreError, InstanceId, JobId, TaskConfig, TaskRuntime};

/// One instance's launch info, as handed to the resource manager: the
/// runtime just synthesized (or reused) plus its merged per-instance
/// config (default job config overlaid by instance overrides).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLaunchInfo {
    pub job_id: JobId,
    pub instance_id: InstanceId,
    pub runtime: TaskRuntime,
    pub config: TaskConfig,
}

#[async_trait]
pub trait ResMgrClient: Send + Sync {
    /// Submit a batch of tasks for admission. A no-op call with an empty
    /// batch is valid and must not round-trip to the resource manager.
    async fn enqueue_tasks(&self, tasks: Vec<TaskLaunchInfo>) -> Result<(), CoreError>;
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeResMgrClient;

#[cfg(test)]
#[path = "res_mgr_tests.rs"]
mod tests;
