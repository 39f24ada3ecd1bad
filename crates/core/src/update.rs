// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Update` workflow entity and its state machine.

use crate::id::{InstanceId, JobId, UpdateId};

/// Kind of workflow; only `Update` participates in rollback logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowType {
    Update,
    Start,
    Stop,
    Restart,
}

/// Lifecycle state of an update. `Invalid` is a recovery sentinel that is
/// never produced by a tick; it forces a reload before the update can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Initialized,
    RollingForward,
    RollingBackward,
    Paused,
    Succeeded,
    Failed,
    Aborted,
    Invalid,
}

impl UpdateState {
    pub fn is_terminal(self) -> bool {
        matches!(self, UpdateState::Succeeded | UpdateState::Failed | UpdateState::Aborted)
    }
}

/// The configuration version and instance set this update is driving toward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGoalState {
    pub job_version: u64,
    pub instances: Vec<InstanceId>,
}

/// Batching and failure-tolerance knobs for one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateConfig {
    /// 0 means "no batching; process everything in one run".
    pub batch_size: u32,
    /// 0 means "no failure limit; never auto-fail or roll back".
    pub max_failure_instances: u32,
    pub max_instance_attempts: u32,
    pub rollback_on_failure: bool,
}

/// The update (workflow) being executed.
///
/// Per-instance classification moves monotonically pending -> current ->
/// {done, failed}; entries never leave `instances_done`/`instances_failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub id: UpdateId,
    pub job_id: JobId,
    pub workflow_type: WorkflowType,
    pub state: UpdateState,
    pub goal_state: UpdateGoalState,
    pub config: UpdateConfig,
    pub instances_added: Vec<InstanceId>,
    pub instances_updated: Vec<InstanceId>,
    pub instances_removed: Vec<InstanceId>,
    pub instances_current: Vec<InstanceId>,
    pub instances_done: Vec<InstanceId>,
    pub instances_failed: Vec<InstanceId>,
}

impl Update {
    /// `type == UPDATE && state == ROLLING_BACKWARD` — see [`UpdateConfig::rollback_on_failure`]
    /// and §4.6 of the update-run design.
    pub fn is_rollback(&self) -> bool {
        self.workflow_type == WorkflowType::Update && self.state == UpdateState::RollingBackward
    }

    /// Rollback is only legal for an UPDATE workflow not already rolling back.
    pub fn can_rollback(&self) -> bool {
        self.workflow_type == WorkflowType::Update && self.state != UpdateState::RollingBackward
    }

    /// `|done| + |failed| == |goalState.instances|`.
    pub fn is_complete(&self) -> bool {
        self.instances_done.len() + self.instances_failed.len() >= self.goal_state.instances.len()
    }
}
