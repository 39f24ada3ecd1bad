// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! §4.7 — the top-level tick function. Composes the reader, planner,
//! confirmer, dispatcher, and writer for one update, then decides whether
//! to re-enqueue immediately or leave the next wake-up to task events.

use std::time::Instant;

use rollout_adapters::{Metrics, ResMgrClient};
use rollout_core::{concat_ordered, UpdateState};
use rollout_storage::{JobCache, JobStore, TaskStore, UpdateCache};

use crate::error::RuntimeError;
use crate::scheduler::Engine;
use crate::{diff_planner, failure_handler, mutation_dispatcher, progress_reader, progress_writer, status_confirmer};

/// Everything one tick needs; borrowed for the duration of the call. The
/// caller (the daemon's poll loop) is responsible for resolving `job_id` /
/// `update_id` to these cache handles — that lookup is the "shared driver"
/// of §5, outside the core's scope.
pub struct TickContext<'a> {
    pub job: &'a JobCache,
    pub update: &'a UpdateCache,
    pub job_store: &'a dyn JobStore,
    pub task_store: &'a dyn TaskStore,
    pub res_mgr: &'a dyn ResMgrClient,
    pub engine: &'a dyn Engine,
    pub metrics: &'a Metrics,
}

/// Runs one tick for the update bound to `ctx`. Increments `UpdateRun` on
/// success and `UpdateRunFail` on error before propagating — the outer
/// goal-state engine retries a failed tick with its own backoff.
pub async fn tick(ctx: &TickContext<'_>) -> Result<(), RuntimeError> {
    match run(ctx).await {
        Ok(()) => {
            ctx.metrics.update_run_inc();
            Ok(())
        }
        Err(e) => {
            ctx.metrics.update_run_fail_inc();
            Err(e)
        }
    }
}

async fn run(ctx: &TickContext<'_>) -> Result<(), RuntimeError> {
    let job_id = ctx.update.job_id();
    let update_id = ctx.update.id();

    if ctx.update.get_state() == UpdateState::Invalid {
        tracing::info!(%job_id, %update_id, "update state invalid, deferring to reload path");
        return Ok(());
    }

    let goal_state = ctx.update.get_goal_state();
    let config = ctx.update.get_update_config();
    let previous_current = ctx.update.get_instances_current();

    let partition = progress_reader::read(ctx.job, &previous_current, goal_state.job_version, config.max_instance_attempts)?;

    let mut done = concat_ordered(&[&ctx.update.get_instances_done(), &partition.done]);
    let mut failed = concat_ordered(&[&ctx.update.get_instances_failed(), &partition.failed]);

    if failure_handler::should_trigger(&config, failed.len()) {
        failure_handler::handle(ctx.job, ctx.job_store, ctx.update, done, failed, partition.still_current.clone()).await?;
        ctx.engine.enqueue_update(job_id, update_id, Instant::now());
        return Ok(());
    }

    let (to_add, to_update, to_remove) = diff_planner::plan(ctx.update, &partition.still_current, &done, &failed);
    let confirmed = status_confirmer::confirm(ctx.job, goal_state.job_version, to_add, to_update, to_remove)?;
    done = concat_ordered(&[&done, &confirmed.done]);

    let dispatched = mutation_dispatcher::dispatch(
        ctx.job,
        ctx.job_store,
        ctx.task_store,
        ctx.res_mgr,
        ctx.engine,
        ctx.update,
        &confirmed,
    )
    .await?;

    progress_writer::write(ctx.update, done.clone(), failed.clone(), &partition.still_current, &dispatched);

    reenqueue_if_appropriate(ctx, &job_id, &update_id, &goal_state, &done, &failed, &dispatched);

    Ok(())
}

/// §4.7 step 6. Terminal work always wakes the update back up immediately.
/// Short of that, a dispatched instance that has *already* settled (no task
/// event will arrive to nudge us) gets the same immediate wake-up, since
/// there is spare batch capacity worth claiming right away.
fn reenqueue_if_appropriate(
    ctx: &TickContext<'_>,
    job_id: &rollout_core::JobId,
    update_id: &rollout_core::UpdateId,
    goal_state: &rollout_core::UpdateGoalState,
    done: &[rollout_core::InstanceId],
    failed: &[rollout_core::InstanceId],
    dispatched: &mutation_dispatcher::DispatchedBatch,
) {
    if done.len() + failed.len() >= goal_state.instances.len() {
        ctx.engine.enqueue_update(job_id.clone(), update_id.clone(), Instant::now());
        return;
    }

    let settled_already = dispatched
        .updated
        .iter()
        .chain(dispatched.removed.iter())
        .any(|&instance_id| {
            ctx.job
                .get_task(instance_id)
                .and_then(|handle| handle.get_runtime().ok())
                .is_some_and(|runtime| runtime.is_update_completed(goal_state.job_version) || runtime.is_terminated())
        });

    if settled_already {
        ctx.engine.enqueue_update(job_id.clone(), update_id.clone(), Instant::now());
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
