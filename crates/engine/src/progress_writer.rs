// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persists the updated per-update bookkeeping after a tick's dispatch —
//! the commit point the status confirmer and mutation dispatcher's
//! reconfirmation make safe to replay (§7).

use rollout_core::InstanceId;
use rollout_storage::UpdateCache;

use crate::mutation_dispatcher::DispatchedBatch;

/// `newCurrent = previousCurrent ++ added ++ updated ++ removed` (§4.5).
/// Deduplication is unnecessary: planning guarantees the dispatched sets are
/// disjoint from `done ∪ failed`, and `previous_current` only ever contains
/// instances the progress reader just confirmed are still in flight.
pub fn write(
    update: &UpdateCache,
    done: Vec<InstanceId>,
    failed: Vec<InstanceId>,
    previous_current: &[InstanceId],
    dispatched: &DispatchedBatch,
) {
    let new_current = rollout_core::concat_ordered(&[
        previous_current,
        &dispatched.added,
        &dispatched.updated,
        &dispatched.removed,
    ]);

    // The lifecycle state is not altered here — it remains whatever the
    // workflow presently is. State transitions are the failure handler's
    // and the orchestrator's job.
    let state = update.get_state();
    update.write_progress(state, done, failed, new_current);
}

#[cfg(test)]
#[path = "progress_writer_tests.rs"]
mod tests;
