// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test builders for [`Update`] and friends, shared across crates behind the
//! `test-support` feature (mirrors the reference system's `test-support`
//! gating of fixture builders).

use crate::id::{InstanceId, JobId, UpdateId};
use crate::update::{Update, UpdateConfig, UpdateGoalState, UpdateState, WorkflowType};

/// Builds an `Update` with sane defaults; override fields with the setters.
pub struct UpdateBuilder {
    update: Update,
}

impl UpdateBuilder {
    pub fn new(id: &str, job_id: &str, instances: Vec<InstanceId>) -> Self {
        UpdateBuilder {
            update: Update {
                id: UpdateId::new(id),
                job_id: JobId::new(job_id),
                workflow_type: WorkflowType::Update,
                state: UpdateState::RollingForward,
                goal_state: UpdateGoalState {
                    job_version: 2,
                    instances,
                },
                config: UpdateConfig {
                    batch_size: 0,
                    max_failure_instances: 0,
                    max_instance_attempts: 3,
                    rollback_on_failure: false,
                },
                instances_added: Vec::new(),
                instances_updated: Vec::new(),
                instances_removed: Vec::new(),
                instances_current: Vec::new(),
                instances_done: Vec::new(),
                instances_failed: Vec::new(),
            },
        }
    }

    pub fn added(mut self, instances: Vec<InstanceId>) -> Self {
        self.update.instances_added = instances;
        self
    }

    pub fn updated(mut self, instances: Vec<InstanceId>) -> Self {
        self.update.instances_updated = instances;
        self
    }

    pub fn removed(mut self, instances: Vec<InstanceId>) -> Self {
        self.update.instances_removed = instances;
        self
    }

    pub fn current(mut self, instances: Vec<InstanceId>) -> Self {
        self.update.instances_current = instances;
        self
    }

    pub fn done(mut self, instances: Vec<InstanceId>) -> Self {
        self.update.instances_done = instances;
        self
    }

    pub fn failed(mut self, instances: Vec<InstanceId>) -> Self {
        self.update.instances_failed = instances;
        self
    }

    pub fn batch_size(mut self, n: u32) -> Self {
        self.update.config.batch_size = n;
        self
    }

    pub fn max_failure_instances(mut self, n: u32) -> Self {
        self.update.config.max_failure_instances = n;
        self
    }

    pub fn rollback_on_failure(mut self, v: bool) -> Self {
        self.update.config.rollback_on_failure = v;
        self
    }

    pub fn state(mut self, state: UpdateState) -> Self {
        self.update.state = state;
        self
    }

    pub fn job_version(mut self, version: u64) -> Self {
        self.update.goal_state.job_version = version;
        self
    }

    pub fn build(self) -> Update {
        self.update
    }
}
