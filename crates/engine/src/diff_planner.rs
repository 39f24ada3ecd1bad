// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Computes the unprocessed add/update/remove sets for one run and applies
//! batch-size admission.

use rollout_core::{concat_ordered, subtract_ordered, InstanceId};
use rollout_storage::UpdateCache;

/// `(toAdd, toUpdate, toRemove)` after batch admission.
pub type Batch = (Vec<InstanceId>, Vec<InstanceId>, Vec<InstanceId>);

/// Truncate `unprocessed` to at most `*capacity` entries, preserving order,
/// and deduct what was taken from `capacity`.
fn take(unprocessed: Vec<InstanceId>, capacity: &mut usize) -> Vec<InstanceId> {
    if unprocessed.len() <= *capacity {
        *capacity -= unprocessed.len();
        unprocessed
    } else {
        let taken = unprocessed[..*capacity].to_vec();
        *capacity = 0;
        taken
    }
}

/// `plan(update, current, done, failed)` — see §4.2 of the design: subtract
/// what's already accounted for, then admit in priority order add → update
/// → remove up to the batch's remaining capacity.
pub fn plan(update: &UpdateCache, current: &[InstanceId], done: &[InstanceId], failed: &[InstanceId]) -> Batch {
    let processed = concat_ordered(&[current, done, failed]);

    let unprocessed_add = subtract_ordered(&update.get_instances_added(), &processed);
    let unprocessed_update = subtract_ordered(&update.get_instances_updated(), &processed);
    let unprocessed_remove = subtract_ordered(&update.get_instances_removed(), &processed);

    let batch_size = update.get_update_config().batch_size;
    if batch_size == 0 {
        return (unprocessed_add, unprocessed_update, unprocessed_remove);
    }

    let capacity = batch_size as i64 - current.len() as i64;
    if capacity <= 0 {
        return (Vec::new(), Vec::new(), Vec::new());
    }
    let mut capacity = capacity as usize;

    let to_add = take(unprocessed_add, &mut capacity);
    let to_update = take(unprocessed_update, &mut capacity);
    let to_remove = take(unprocessed_remove, &mut capacity);
    (to_add, to_update, to_remove)
}

#[cfg(test)]
#[path = "diff_planner_tests.rs"]
mod tests;
