// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Re-validates a planned batch against live task state before dispatch.

use rollout_core::InstanceId;
use rollout_storage::JobCache;

use crate::error::RuntimeError;

/// The planned batch after reconciliation against live state, plus any
/// instances newly discovered to already be done (removals that had already
/// landed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmedBatch {
    pub to_add: Vec<InstanceId>,
    pub to_update: Vec<InstanceId>,
    pub to_remove: Vec<InstanceId>,
    pub done: Vec<InstanceId>,
}

/// `confirmInstancesStatus` — see §4.3. Planned adds may need to become
/// updates (a runtime already exists at a stale version); planned updates
/// whose runtime has vanished become adds; planned removes whose instance is
/// already gone are counted done instead of dispatched again.
pub fn confirm(
    job: &JobCache,
    target_version: u64,
    to_add: Vec<InstanceId>,
    to_update: Vec<InstanceId>,
    to_remove: Vec<InstanceId>,
) -> Result<ConfirmedBatch, RuntimeError> {
    let mut confirmed = ConfirmedBatch::default();

    for instance_id in to_add {
        let handle = match job.add_task(instance_id) {
            Ok(handle) => handle,
            Err(e) if e.is_not_found_like() => {
                confirmed.to_add.push(instance_id);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match handle.get_runtime() {
            Ok(runtime) if runtime.config_version == target_version => {
                confirmed.to_add.push(instance_id);
            }
            Ok(_) => confirmed.to_update.push(instance_id),
            Err(e) if e.is_not_found_like() => confirmed.to_add.push(instance_id),
            Err(e) => return Err(e.into()),
        }
    }

    for instance_id in to_update {
        let handle = match job.add_task(instance_id) {
            Ok(handle) => handle,
            Err(e) if e.is_not_found_like() => {
                confirmed.to_add.push(instance_id);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match handle.get_runtime() {
            Ok(_) => confirmed.to_update.push(instance_id),
            Err(e) if e.is_not_found_like() => confirmed.to_add.push(instance_id),
            Err(e) => return Err(e.into()),
        }
    }

    for instance_id in to_remove {
        match job.add_task(instance_id) {
            Ok(_) => confirmed.to_remove.push(instance_id),
            Err(e) if e.is_not_found_like() => confirmed.done.push(instance_id),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(confirmed)
}

#[cfg(test)]
#[path = "status_confirmer_tests.rs"]
mod tests;
