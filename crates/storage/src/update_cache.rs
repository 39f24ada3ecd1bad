// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory, internally-synchronised cache of one update's state — the
//! production `UpdateCache` collaborator from the update-run design (§6).

use std::sync::Arc;

use parking_lot::Mutex;
use rollout_core::{
    InstanceId, JobConfig, JobId, RuntimeDiff, UpdateConfig, UpdateGoalState, UpdateId,
    UpdateState, WorkflowType,
};
use rollout_core::Update;

/// Shared, lock-protected cache for a single update.
#[derive(Clone)]
pub struct UpdateCache {
    inner: Arc<Mutex<Update>>,
}

impl UpdateCache {
    pub fn new(update: Update) -> Self {
        UpdateCache {
            inner: Arc::new(Mutex::new(update)),
        }
    }

    pub fn id(&self) -> UpdateId {
        self.inner.lock().id.clone()
    }

    pub fn job_id(&self) -> JobId {
        self.inner.lock().job_id.clone()
    }

    pub fn get_state(&self) -> UpdateState {
        self.inner.lock().state
    }

    pub fn get_goal_state(&self) -> UpdateGoalState {
        self.inner.lock().goal_state.clone()
    }

    pub fn get_update_config(&self) -> UpdateConfig {
        self.inner.lock().config
    }

    pub fn get_workflow_type(&self) -> WorkflowType {
        self.inner.lock().workflow_type
    }

    pub fn get_instances_added(&self) -> Vec<InstanceId> {
        self.inner.lock().instances_added.clone()
    }

    pub fn get_instances_updated(&self) -> Vec<InstanceId> {
        self.inner.lock().instances_updated.clone()
    }

    pub fn get_instances_removed(&self) -> Vec<InstanceId> {
        self.inner.lock().instances_removed.clone()
    }

    pub fn get_instances_current(&self) -> Vec<InstanceId> {
        self.inner.lock().instances_current.clone()
    }

    pub fn get_instances_done(&self) -> Vec<InstanceId> {
        self.inner.lock().instances_done.clone()
    }

    pub fn get_instances_failed(&self) -> Vec<InstanceId> {
        self.inner.lock().instances_failed.clone()
    }

    pub fn is_rollback(&self) -> bool {
        self.inner.lock().is_rollback()
    }

    pub fn can_rollback(&self) -> bool {
        self.inner.lock().can_rollback()
    }

    /// `UpdateCache::getRuntimeDiff` — the diff applied to an instance being
    /// updated in place. A function of old vs. new job config only (the
    /// same value is returned for every instance in a tick); see
    /// `RuntimeDiff::update`.
    pub fn get_runtime_diff(&self, job_config: &JobConfig) -> RuntimeDiff {
        RuntimeDiff::update(job_config.version)
    }

    /// `UpdateCache::writeProgress` — persist done/failed/current and
    /// (optionally) a new lifecycle state, atomically.
    pub fn write_progress(
        &self,
        state: UpdateState,
        done: Vec<InstanceId>,
        failed: Vec<InstanceId>,
        current: Vec<InstanceId>,
    ) {
        let mut inner = self.inner.lock();
        inner.state = state;
        inner.instances_done = done;
        inner.instances_failed = failed;
        inner.instances_current = current;
    }

    /// Recompute the update's plan after a job-config rollback: the set
    /// being added and the set being removed trade places (an instance the
    /// forward run was adding is now being removed, and vice versa), while
    /// instances being updated in place stay updated — only now against the
    /// rolled-back version. Returns the swapped (added, removed) pair so the
    /// caller can reconcile instances that monotonic `done`/`failed`
    /// bookkeeping would otherwise hide from the next plan (see
    /// `rollout_engine::failure_handler::reconcile_unchanged_instances`).
    pub fn recompute_after_rollback(&self, rolled_back_version: u64) -> (Vec<InstanceId>, Vec<InstanceId>) {
        let mut inner = self.inner.lock();
        let new_added = inner.instances_removed.clone();
        let new_removed = inner.instances_added.clone();
        inner.instances_added = new_added.clone();
        inner.instances_removed = new_removed.clone();
        inner.goal_state.job_version = rolled_back_version;
        (new_added, new_removed)
    }

    /// A consistent snapshot of the whole update, for read-only composition
    /// (e.g. the orchestrator's terminal-completion check).
    pub fn snapshot(&self) -> Update {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
#[path = "update_cache_tests.rs"]
mod tests;
