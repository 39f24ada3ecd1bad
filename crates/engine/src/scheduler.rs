// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Engine` re-enqueue interface (§6) and an in-process priority queue
//! implementing it, keyed by deadline rather than by a plain string timer
//! id.
//!
//! Only one pending deadline is kept per update id: a re-enqueue while one
//! is already pending overwrites it rather than queueing a duplicate, since
//! the goal-state driver guarantees at most one outstanding tick per update
//! id (§5) — there is never a reason to run the same update twice for the
//! same wake-up.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rollout_core::{InstanceId, JobId, UpdateId};

/// `Engine::enqueueUpdate` / `Engine::enqueueTask` — the re-enqueue surface
/// the update-run pipeline posts to. Non-blocking by construction: every
/// implementation must return without suspending.
pub trait Engine: Send + Sync {
    fn enqueue_update(&self, job_id: JobId, update_id: UpdateId, deadline: Instant);
    fn enqueue_task(&self, job_id: JobId, instance_id: InstanceId, deadline: Instant);
}

/// In-process implementation backing both the orchestrator's re-enqueue
/// requests and the daemon's outer poll loop.
#[derive(Debug, Default)]
pub struct Scheduler {
    updates: Mutex<HashMap<UpdateId, (JobId, Instant)>>,
    tasks: Mutex<HashMap<(JobId, InstanceId), Instant>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for callers holding a relative delay rather than an
    /// absolute deadline.
    pub fn enqueue_update_after(&self, job_id: JobId, update_id: UpdateId, delay: Duration, now: Instant) {
        self.enqueue_update(job_id, update_id, now + delay);
    }

    /// Pop every update whose deadline has passed, earliest first.
    pub fn ready_updates(&self, now: Instant) -> Vec<(JobId, UpdateId)> {
        let mut updates = self.updates.lock();
        let mut ready: Vec<(Instant, JobId, UpdateId)> = updates
            .iter()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .map(|(update_id, (job_id, deadline))| (*deadline, job_id.clone(), update_id.clone()))
            .collect();
        ready.sort_by_key(|(deadline, ..)| *deadline);
        for (_, _, update_id) in &ready {
            updates.remove(update_id);
        }
        ready
            .into_iter()
            .map(|(_, job_id, update_id)| (job_id, update_id))
            .collect()
    }

    pub fn cancel_update(&self, update_id: &UpdateId) {
        self.updates.lock().remove(update_id);
    }

    pub fn next_update_deadline(&self) -> Option<Instant> {
        self.updates.lock().values().map(|(_, d)| *d).min()
    }

    pub fn has_pending_updates(&self) -> bool {
        !self.updates.lock().is_empty()
    }

    pub fn pending_task_count(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Engine for Scheduler {
    fn enqueue_update(&self, job_id: JobId, update_id: UpdateId, deadline: Instant) {
        tracing::debug!(%job_id, %update_id, "enqueue update");
        self.updates.lock().insert(update_id, (job_id, deadline));
    }

    fn enqueue_task(&self, job_id: JobId, instance_id: InstanceId, deadline: Instant) {
        tracing::debug!(%job_id, instance_id, "enqueue task");
        self.tasks.lock().insert((job_id, instance_id), deadline);
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
