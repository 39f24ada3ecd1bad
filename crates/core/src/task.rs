// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task runtime and the Mesos task id / pod event encoding it carries.

use crate::id::JobId;
use serde::{Deserialize, Serialize};

/// Observed lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Initialized,
    Pending,
    Launched,
    Starting,
    Running,
    Succeeded,
    Failed,
    Lost,
    Killed,
}

impl TaskState {
    /// States from which a task will never be retried by the task subsystem.
    pub fn is_permanent_failure(self) -> bool {
        matches!(self, TaskState::Failed | TaskState::Lost)
    }

    /// States the task subsystem treats as terminal (no further transitions).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Succeeded | TaskState::Failed | TaskState::Lost | TaskState::Killed
        )
    }
}

/// Desired terminal state of a task, set by whatever is driving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskGoalState {
    Running,
    Killed,
    Deleted,
}

impl TaskGoalState {
    /// Goal states that will not be revisited once reached.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskGoalState::Killed | TaskGoalState::Deleted)
    }
}

/// Opaque Mesos task id: `<job>-<instance>-<run_index>`.
///
/// Must round-trip through the stores byte-for-byte; the run index is the
/// only part the update-run pipeline ever inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MesosTaskId(pub String);

impl MesosTaskId {
    pub fn make(job_id: &JobId, instance_id: u32, run_index: u64) -> Self {
        MesosTaskId(format!("{}-{}-{}", job_id.as_str(), instance_id, run_index))
    }

    /// Parse the trailing decimal run index off a task/pod id.
    ///
    /// Returns `None` if the id has no `-<digits>` suffix.
    pub fn parse_run_index(value: &str) -> Option<u64> {
        let (_, suffix) = value.rsplit_once('-')?;
        suffix.parse::<u64>().ok()
    }
}

/// A historical pod run, newest first in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodEvent {
    pub pod_id: MesosTaskId,
}

/// Task runtime, owned by the task subsystem and read/patched by the
/// update-run dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRuntime {
    pub state: TaskState,
    pub goal_state: TaskGoalState,
    pub config_version: u64,
    pub desired_config_version: u64,
    pub mesos_task_id: Option<MesosTaskId>,
    pub desired_mesos_task_id: Option<MesosTaskId>,
    pub prev_mesos_task_id: Option<MesosTaskId>,
    pub failure_count: u32,
    pub message: String,
}

impl TaskRuntime {
    /// `isTaskUpdateCompleted` — running at `target` with no pending config
    /// change; used by the orchestrator's post-run re-enqueue check to spot
    /// a dispatched instance that already settled before any task event
    /// arrives to wake the update back up.
    pub fn is_update_completed(&self, target: u64) -> bool {
        self.state == TaskState::Running
            && self.config_version == self.desired_config_version
            && self.config_version == target
    }

    /// `isTaskTerminated` — both the actual and goal state are terminal;
    /// nothing further will happen to this instance without a new update.
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminal() && self.goal_state.is_terminal()
    }

    /// A freshly synthesized runtime for an instance being added, pinned to
    /// `target` as both its current and desired config version.
    pub fn initializing(target: u64) -> Self {
        TaskRuntime {
            state: TaskState::Initialized,
            goal_state: TaskGoalState::Running,
            config_version: target,
            desired_config_version: target,
            mesos_task_id: None,
            desired_mesos_task_id: None,
            prev_mesos_task_id: None,
            failure_count: 0,
            message: String::new(),
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
