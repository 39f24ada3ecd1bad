// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier, config, and the runtime fields the update-run pipeline touches.

use std::collections::HashMap;

pub use crate::id::JobId;

/// Kind of job; only affects which default goal state is restored after a
/// job is revived from KILLED (see [`default_goal_state`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Service,
    Batch,
}

/// Desired terminal state of a job, as tracked by the job subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobGoalState {
    Running,
    Killed,
}

/// The job-subsystem-owned fields the update-run pipeline reads and patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRuntime {
    pub goal_state: JobGoalState,
}

/// Per-instance task config overrides, overlaid on [`JobConfig::default_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskConfig {
    pub fields: HashMap<String, String>,
}

impl TaskConfig {
    /// Merge an instance override on top of a default config; override wins
    /// field-by-field, matching `taskconfig.Merge` semantics.
    pub fn merge(default: &TaskConfig, instance: Option<&TaskConfig>) -> TaskConfig {
        let mut merged = default.fields.clone();
        if let Some(instance) = instance {
            merged.extend(instance.fields.clone());
        }
        TaskConfig { fields: merged }
    }
}

/// A versioned snapshot of a job's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub job_id: JobId,
    pub version: u64,
    pub job_type: JobType,
    pub instance_count: u32,
    pub default_config: TaskConfig,
    pub instance_config: HashMap<u32, TaskConfig>,
}

impl JobConfig {
    pub fn task_config_for(&self, instance_id: u32) -> TaskConfig {
        TaskConfig::merge(&self.default_config, self.instance_config.get(&instance_id))
    }
}

/// Returns the default goal state a job is restored to when its goal state
/// was KILLED and instances are being added back by an update.
pub fn default_goal_state(_job_type: JobType) -> JobGoalState {
    JobGoalState::Running
}

/// Opaque add-on data returned alongside a job config by the job store;
/// threaded through unchanged to `JobCache::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigAddOn {
    pub changelog: Vec<String>,
}
