// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executes a confirmed batch: creates new task runtimes, patches existing
//! ones, marks removals, and hands new tasks to the resource manager.

use std::collections::HashMap;

use std::time::Instant;

use rollout_adapters::{ResMgrClient, TaskLaunchInfo};
use rollout_core::{
    job, InstanceId, JobConfig, JobGoalState, JobId, JobType, MesosTaskId, PodEvent, RuntimeDiff,
    TaskGoalState, TaskRuntime, TaskState,
};
use rollout_storage::{CacheUpdateMode, JobCache, JobStore, TaskStore, UpdateCache};

use crate::error::RuntimeError;
use crate::scheduler::Engine;
use crate::status_confirmer::ConfirmedBatch;

/// The three sets actually dispatched this tick, used by the progress
/// writer to compute the new `current` and by the orchestrator's
/// post-run re-enqueue check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchedBatch {
    pub added: Vec<InstanceId>,
    pub updated: Vec<InstanceId>,
    pub removed: Vec<InstanceId>,
}

impl DispatchedBatch {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// `MutationDispatcher::recover_run_id` — consult the pod-event log for an
/// instance being freshly synthesized and, if it has run before, pin the
/// new runtime to the next run index so prior logs stay reachable. A no-op
/// (the runtime keeps no mesos task id) when there is no history.
fn recover_run_id(runtime: &mut TaskRuntime, job_id: &JobId, instance_id: InstanceId, events: &[PodEvent]) {
    let Some(last) = events.first() else {
        return;
    };
    let run_index = MesosTaskId::parse_run_index(&last.pod_id.0).unwrap_or(0);
    let next = MesosTaskId::make(job_id, instance_id, run_index + 1);
    runtime.mesos_task_id = Some(next.clone());
    runtime.desired_mesos_task_id = Some(next);
    runtime.prev_mesos_task_id = Some(last.pod_id.clone());
}

/// Synthesizes a fresh INITIALIZED runtime for an instance the cache has
/// never materialized (unmaterialized, or beyond the job's current instance
/// count — both read as "no runtime" via `JobCache::get_task`), recovering
/// its run index from pod-event history.
async fn synthesize_runtime(
    task_store: &dyn TaskStore,
    job_id: &JobId,
    instance_id: InstanceId,
    target_version: u64,
    default_config: &JobConfig,
) -> Result<(TaskRuntime, TaskLaunchInfo), RuntimeError> {
    let mut runtime = TaskRuntime::initializing(target_version);
    let events = task_store.get_pod_events(job_id, instance_id).await?;
    recover_run_id(&mut runtime, job_id, instance_id, &events);

    let launch_info = TaskLaunchInfo {
        job_id: job_id.clone(),
        instance_id,
        runtime: runtime.clone(),
        config: default_config.task_config_for(instance_id),
    };
    Ok((runtime, launch_info))
}

/// §4.4 **Add**. Ensures the job isn't KILLED, then for each instance either
/// reuses an INITIALIZED runtime, skips one in any other state, or
/// synthesizes a fresh one recovering its run index from pod-event history.
///
/// Fetches via `JobCache::get_task` (not `add_task`): the status confirmer
/// deliberately confirms an out-of-range/not-found add as `to_add` (§4.3),
/// so dispatch must treat "beyond the cache's current instance count" the
/// same as "not yet materialized" rather than aborting the tick on
/// `InstanceIdOutOfRange`.
async fn dispatch_add(
    job: &JobCache,
    task_store: &dyn TaskStore,
    res_mgr: &dyn ResMgrClient,
    job_id: &JobId,
    target_version: u64,
    job_type: JobType,
    default_config: &JobConfig,
    to_add: &[InstanceId],
) -> Result<Vec<InstanceId>, RuntimeError> {
    if to_add.is_empty() {
        return Ok(Vec::new());
    }

    if job.get_runtime()?.goal_state == JobGoalState::Killed {
        job.update(
            job::default_goal_state(job_type),
            &Default::default(),
            CacheUpdateMode::CacheAndStore,
        )?;
    }

    let mut synthesized: HashMap<InstanceId, TaskRuntime> = HashMap::new();
    let mut launch_infos: Vec<TaskLaunchInfo> = Vec::new();
    let mut dispatched = Vec::new();

    for &instance_id in to_add {
        let needs_synthesis = match job.get_task(instance_id) {
            Some(handle) => match handle.get_runtime() {
                Ok(existing) if existing.state == TaskState::Initialized => {
                    launch_infos.push(TaskLaunchInfo {
                        job_id: job_id.clone(),
                        instance_id,
                        runtime: existing,
                        config: default_config.task_config_for(instance_id),
                    });
                    dispatched.push(instance_id);
                    false
                }
                Ok(other) => {
                    tracing::debug!(instance_id, state = ?other.state, "add skipped: runtime not in INITIALIZED");
                    false
                }
                Err(e) if e.is_not_found_like() => true,
                Err(e) => return Err(e.into()),
            },
            None => true,
        };

        if needs_synthesis {
            let (runtime, launch_info) =
                synthesize_runtime(task_store, job_id, instance_id, target_version, default_config).await?;
            launch_infos.push(launch_info);
            synthesized.insert(instance_id, runtime);
            dispatched.push(instance_id);
        }
    }

    job.create_tasks(synthesized, "update")?;
    res_mgr.enqueue_tasks(launch_infos).await?;

    Ok(dispatched)
}

/// §4.4 **Update**. Applies each instance's job-config diff in one batch,
/// reviving an instance whose runtime is currently goal-stated DELETED, then
/// wakes the per-task goal-state loop for each.
fn dispatch_update(
    job: &JobCache,
    update: &UpdateCache,
    engine: &dyn Engine,
    job_id: &JobId,
    job_config: &JobConfig,
    to_update: &[InstanceId],
) -> Result<Vec<InstanceId>, RuntimeError> {
    if to_update.is_empty() {
        return Ok(Vec::new());
    }

    let mut diffs = HashMap::new();
    let mut dispatched = Vec::new();

    for &instance_id in to_update {
        let mut diff = update.get_runtime_diff(job_config);
        if diff.is_empty() {
            continue;
        }

        let handle = job.add_task(instance_id)?;
        let runtime = handle.get_runtime()?;
        if runtime.goal_state == TaskGoalState::Deleted {
            diff.revive();
        }

        diffs.insert(instance_id, diff);
        dispatched.push(instance_id);
    }

    job.patch_tasks(diffs)?;
    for &instance_id in &dispatched {
        engine.enqueue_task(job_id.clone(), instance_id, Instant::now());
    }
    Ok(dispatched)
}

/// §4.4 **Remove**. Patches each instance to a terminal goal state in one
/// batch.
fn dispatch_remove(
    job: &JobCache,
    engine: &dyn Engine,
    job_id: &JobId,
    target_version: u64,
    to_remove: &[InstanceId],
) -> Result<Vec<InstanceId>, RuntimeError> {
    if to_remove.is_empty() {
        return Ok(Vec::new());
    }

    let diffs: HashMap<InstanceId, RuntimeDiff> = to_remove
        .iter()
        .map(|&id| (id, RuntimeDiff::remove(target_version)))
        .collect();

    job.patch_tasks(diffs)?;
    for &instance_id in to_remove {
        engine.enqueue_task(job_id.clone(), instance_id, Instant::now());
    }
    Ok(to_remove.to_vec())
}

/// `processInstancesInUpdate` — executes add, then update, then remove, each
/// a no-op over an empty input. Skips loading the target job config
/// entirely when the confirmed batch is empty (the reference system's
/// `processUpdate` early return, preserved literally — see SPEC_FULL.md §9).
pub async fn dispatch(
    job: &JobCache,
    job_store: &dyn JobStore,
    task_store: &dyn TaskStore,
    res_mgr: &dyn ResMgrClient,
    engine: &dyn Engine,
    update: &UpdateCache,
    confirmed: &ConfirmedBatch,
) -> Result<DispatchedBatch, RuntimeError> {
    if confirmed.to_add.is_empty() && confirmed.to_update.is_empty() && confirmed.to_remove.is_empty() {
        return Ok(DispatchedBatch::default());
    }

    let job_id = update.job_id();
    let target_version = update.get_goal_state().job_version;
    let (job_config, _config_add_on) = job_store.get_job_config_with_version(&job_id, target_version).await?;

    let added = dispatch_add(
        job,
        task_store,
        res_mgr,
        &job_id,
        target_version,
        job_config.job_type,
        &job_config,
        &confirmed.to_add,
    )
    .await?;
    let updated = dispatch_update(job, update, engine, &job_id, &job_config, &confirmed.to_update)?;
    let removed = dispatch_remove(job, engine, &job_id, target_version, &confirmed.to_remove)?;

    Ok(DispatchedBatch { added, updated, removed })
}

#[cfg(test)]
#[path = "mutation_dispatcher_tests.rs"]
mod tests;
