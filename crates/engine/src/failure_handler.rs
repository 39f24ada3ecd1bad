// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! §4.6 — rolls a failing `UPDATE` workflow back to its pre-update config,
//! or marks it FAILED, once the failure threshold is crossed.

use std::collections::HashMap;

use rollout_core::{InstanceId, RuntimeDiff, UpdateConfig, UpdateState};
use rollout_storage::{JobCache, JobStore, UpdateCache};

use crate::error::RuntimeError;

/// Which branch of §4.6 the handler took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    RolledBack,
    MarkedFailed,
}

/// `config.maxFailureInstances != 0 && |failed| >= config.maxFailureInstances`.
pub fn should_trigger(config: &UpdateConfig, failed_count: usize) -> bool {
    config.max_failure_instances != 0 && failed_count >= config.max_failure_instances as usize
}

/// Runs once the failure threshold has been crossed. Branch 1 rolls the job
/// back to its pre-update config and reconciles instances left dangling by
/// the monotonic done/failed bookkeeping; branch 2 simply marks the update
/// FAILED. Both branches persist done/failed/current — re-enqueue is the
/// orchestrator's responsibility in both cases.
pub async fn handle(
    job: &JobCache,
    job_store: &dyn JobStore,
    update: &UpdateCache,
    done: Vec<InstanceId>,
    failed: Vec<InstanceId>,
    current: Vec<InstanceId>,
) -> Result<FailureOutcome, RuntimeError> {
    let config = update.get_update_config();

    if config.rollback_on_failure && update.can_rollback() {
        // Instances the forward run already marked done by adding — the
        // rollback swaps added<->removed in the update's plan, but monotonic
        // `done` bookkeeping means a planner pass will never revisit these,
        // so they need an explicit goal-state patch now or they'd be left
        // dangling at the old, forward-progress config forever.
        let previously_added = update.get_instances_added();

        let rolled_back_config = job.rollback_workflow()?;
        let job_id = update.job_id();
        let (job_config, _config_add_on) = job_store
            .get_job_config_with_version(&job_id, rolled_back_config.version)
            .await?;
        update.recompute_after_rollback(job_config.version);

        let unchanged: Vec<InstanceId> = done.iter().copied().filter(|id| previously_added.contains(id)).collect();
        if !unchanged.is_empty() {
            let diffs: HashMap<InstanceId, RuntimeDiff> = unchanged
                .into_iter()
                .map(|id| (id, RuntimeDiff::remove(job_config.version)))
                .collect();
            job.patch_tasks(diffs)?;
        }

        update.write_progress(UpdateState::RollingBackward, done, failed, current);
        Ok(FailureOutcome::RolledBack)
    } else {
        update.write_progress(UpdateState::Failed, done, failed, current);
        Ok(FailureOutcome::MarkedFailed)
    }
}

#[cfg(test)]
#[path = "failure_handler_tests.rs"]
mod tests;
