// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classifies the update's in-flight `current` set against live task state.

use rollout_core::{InstanceId, TaskState};
use rollout_storage::JobCache;

use crate::error::RuntimeError;

/// The three disjoint partitions of `current` produced by one read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressPartition {
    pub still_current: Vec<InstanceId>,
    pub done: Vec<InstanceId>,
    pub failed: Vec<InstanceId>,
}

/// Fetch each instance's live runtime and classify it done / failed / still
/// in flight, against `target_version`. A missing runtime (the task was
/// already removed) counts as done.
pub fn read(
    job: &JobCache,
    current: &[InstanceId],
    target_version: u64,
    max_instance_attempts: u32,
) -> Result<ProgressPartition, RuntimeError> {
    let mut partition = ProgressPartition::default();

    for &instance_id in current {
        let runtime = match job.get_task(instance_id) {
            Some(handle) => handle.get_runtime(),
            None => {
                partition.done.push(instance_id);
                continue;
            }
        };

        let runtime = match runtime {
            Ok(runtime) => runtime,
            Err(e) if e.is_not_found_like() => {
                partition.done.push(instance_id);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if runtime.failure_count > max_instance_attempts || runtime.state.is_permanent_failure() {
            partition.failed.push(instance_id);
        } else if runtime.goal_state.is_terminal() && runtime.state.is_terminal() {
            partition.done.push(instance_id);
        } else if runtime.state == TaskState::Running
            && runtime.config_version == runtime.desired_config_version
            && runtime.config_version == target_version
        {
            partition.done.push(instance_id);
        } else {
            partition.still_current.push(instance_id);
        }
    }

    Ok(partition)
}

#[cfg(test)]
#[path = "progress_reader_tests.rs"]
mod tests;
