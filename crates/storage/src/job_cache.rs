// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory, internally-synchronised cache of one job's runtime, config,
//! and task runtimes.
//!
//! This is the production implementation of the `JobCache`/`TaskCache`
//! collaborators named in the update-run design (§6): unlike
//! [`crate::job_store`]/[`crate::task_store`], there is no external database
//! backing it — the cache *is* the store the update-run pipeline reads and
//! patches, matching the reference system's `MaterializedState` (an
//! in-process cache mutated under a lock, not a trait with swappable
//! backends).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rollout_core::{
    ConfigAddOn, CoreError, InstanceId, JobConfig, JobGoalState, JobRuntime, RuntimeDiff,
    TaskRuntime,
};

/// Mirrors `cached.UpdateCacheAndDB` vs. an in-memory-only patch; both modes
/// behave identically here since there is no DB layer, but the distinction
/// is kept so call sites read the same as the reference system's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheUpdateMode {
    CacheOnly,
    CacheAndStore,
}

struct Inner {
    runtime: JobRuntime,
    config: JobConfig,
    previous_config: Option<JobConfig>,
    tasks: HashMap<InstanceId, TaskRuntime>,
}

/// Shared, lock-protected cache for a single job.
#[derive(Clone)]
pub struct JobCache {
    inner: Arc<Mutex<Inner>>,
}

/// A handle to one task's cached runtime, obtained via [`JobCache::add_task`]
/// or [`JobCache::get_task`]. Cheap to clone; reads go back through the
/// owning job's lock.
#[derive(Clone)]
pub struct TaskHandle {
    job: JobCache,
    instance_id: InstanceId,
}

impl TaskHandle {
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// `TaskCache::getRunTime` — `NotFound` if no runtime has been
    /// persisted for this instance yet (the handle may exist without one).
    pub fn get_runtime(&self) -> Result<TaskRuntime, CoreError> {
        self.job
            .inner
            .lock()
            .tasks
            .get(&self.instance_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("task runtime {}", self.instance_id)))
    }
}

impl JobCache {
    pub fn new(config: JobConfig, runtime: JobRuntime) -> Self {
        JobCache {
            inner: Arc::new(Mutex::new(Inner {
                runtime,
                config,
                previous_config: None,
                tasks: HashMap::new(),
            })),
        }
    }

    pub fn get_runtime(&self) -> Result<JobRuntime, CoreError> {
        Ok(self.inner.lock().runtime.clone())
    }

    /// `JobCache::update` — the update-run pipeline only ever patches the
    /// goal state (moving a KILLED job back to running when instances are
    /// added); `config_add_on`/`mode` are accepted for interface fidelity
    /// and otherwise unused by an in-memory cache with no DB tier.
    pub fn update(
        &self,
        goal_state: JobGoalState,
        _config_add_on: &ConfigAddOn,
        _mode: CacheUpdateMode,
    ) -> Result<(), CoreError> {
        self.inner.lock().runtime.goal_state = goal_state;
        Ok(())
    }

    pub fn get_config(&self) -> Result<JobConfig, CoreError> {
        Ok(self.inner.lock().config.clone())
    }

    /// Point the cache at a newly-fetched config version (e.g. after the
    /// job store returns a version the pipeline hadn't seen yet).
    pub fn set_config(&self, config: JobConfig) {
        self.inner.lock().config = config;
    }

    /// `JobCache::rollbackWorkflow` — swap the cached config back to the
    /// version it held before the current update started, returning the
    /// now-current (pre-update) config so the caller can recompute the
    /// update's plan against it.
    pub fn rollback_workflow(&self) -> Result<JobConfig, CoreError> {
        let mut inner = self.inner.lock();
        let previous = inner.previous_config.take().ok_or_else(|| {
            CoreError::InvariantViolation("no previous config to roll back to".to_string())
        })?;
        let current = std::mem::replace(&mut inner.config, previous);
        inner.previous_config = Some(current);
        Ok(inner.config.clone())
    }

    /// Record the pre-update config so a later `rollback_workflow` can swap
    /// back to it. Called once, at update-creation time, outside this
    /// crate's scope in the full system; exposed here for test setup.
    pub fn set_previous_config(&self, config: JobConfig) {
        self.inner.lock().previous_config = Some(config);
    }

    /// `JobCache::createTasks` — batch-persist newly synthesized runtimes.
    /// `owner` identifies the caller for audit logging (e.g. `"update"`).
    pub fn create_tasks(
        &self,
        runtimes: HashMap<InstanceId, TaskRuntime>,
        owner: &str,
    ) -> Result<(), CoreError> {
        if runtimes.is_empty() {
            return Ok(());
        }
        tracing::debug!(owner, count = runtimes.len(), "creating task runtimes");
        let mut inner = self.inner.lock();
        for (instance_id, runtime) in runtimes {
            inner.tasks.insert(instance_id, runtime);
        }
        Ok(())
    }

    /// `JobCache::patchTasks` — apply a batch of sparse diffs atomically.
    /// A diff for an instance with no existing runtime is silently dropped;
    /// callers are expected to have confirmed the runtime exists first
    /// (the status confirmer's job).
    pub fn patch_tasks(&self, diffs: HashMap<InstanceId, RuntimeDiff>) -> Result<(), CoreError> {
        if diffs.is_empty() {
            return Ok(());
        }
        let mut inner = self.inner.lock();
        for (instance_id, diff) in diffs {
            if let Some(runtime) = inner.tasks.get_mut(&instance_id) {
                diff.apply(runtime);
            }
        }
        Ok(())
    }

    /// `JobCache::addTask` — obtain (creating if necessary) a handle to an
    /// instance's task cache entry. Fails with `InstanceIdOutOfRange` if the
    /// instance is beyond the job's current configured instance count.
    pub fn add_task(&self, instance_id: InstanceId) -> Result<TaskHandle, CoreError> {
        let count = self.inner.lock().config.instance_count;
        if instance_id >= count {
            return Err(CoreError::InstanceIdOutOfRange(instance_id));
        }
        Ok(TaskHandle {
            job: self.clone(),
            instance_id,
        })
    }

    /// `JobCache::getTask` — a handle only if one has actually been
    /// materialized (used by the orchestrator's post-run re-enqueue check,
    /// which treats a missing cached task as "nothing to do" rather than
    /// an error).
    pub fn get_task(&self, instance_id: InstanceId) -> Option<TaskHandle> {
        let inner = self.inner.lock();
        if inner.tasks.contains_key(&instance_id) {
            Some(TaskHandle {
                job: self.clone(),
                instance_id,
            })
        } else {
            None
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl JobCache {
    /// Directly seed a task runtime, bypassing `create_tasks`/`patch_tasks`.
    pub fn seed_task(&self, instance_id: InstanceId, runtime: TaskRuntime) {
        self.inner.lock().tasks.insert(instance_id, runtime);
    }
}

#[cfg(test)]
#[path = "job_cache_tests.rs"]
mod tests;
