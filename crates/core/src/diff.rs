// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sparse, typed patch applied to a [`crate::task::TaskRuntime`].
//!
//! One `Option` field per mutable runtime field, rather than a string-keyed
//! map: `None` means "leave as is", `Some(_)` means "set to this value".
//! Keeps batch application atomic without giving up compile-time field names.

use crate::task::{MesosTaskId, TaskGoalState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeDiff {
    pub goal_state: Option<TaskGoalState>,
    pub desired_config_version: Option<u64>,
    pub desired_mesos_task_id: Option<MesosTaskId>,
    pub message: Option<String>,
    pub failure_count: Option<u32>,
}

impl RuntimeDiff {
    pub fn is_empty(&self) -> bool {
        self.goal_state.is_none()
            && self.desired_config_version.is_none()
            && self.desired_mesos_task_id.is_none()
            && self.message.is_none()
            && self.failure_count.is_none()
    }

    /// The diff applied to an instance being updated in place: desired
    /// config repointed at `target`. A function of old vs. new job config
    /// only, not of the instance — the same value for every instance in a
    /// given tick.
    pub fn update(target_version: u64) -> Self {
        RuntimeDiff {
            desired_config_version: Some(target_version),
            ..Default::default()
        }
    }

    /// The diff applied to an instance being removed: goal state DELETED,
    /// desired config pinned to `target`, failure count reset.
    pub fn remove(target_version: u64) -> Self {
        RuntimeDiff {
            goal_state: Some(TaskGoalState::Deleted),
            desired_config_version: Some(target_version),
            desired_mesos_task_id: None,
            message: Some("Task Count reduced via API".to_string()),
            failure_count: Some(0),
        }
    }

    /// Force the goal state field to RUNNING, used to revive an instance
    /// whose runtime is currently goal-stated DELETED.
    pub fn revive(&mut self) {
        self.goal_state = Some(TaskGoalState::Running);
    }

    pub fn apply(&self, runtime: &mut crate::task::TaskRuntime) {
        if let Some(goal_state) = self.goal_state {
            runtime.goal_state = goal_state;
        }
        if let Some(v) = self.desired_config_version {
            runtime.desired_config_version = v;
        }
        if let Some(ref id) = self.desired_mesos_task_id {
            runtime.desired_mesos_task_id = Some(id.clone());
        }
        if let Some(ref m) = self.message {
            runtime.message = m.clone();
        }
        if let Some(c) = self.failure_count {
            runtime.failure_count = c;
        }
    }
}
