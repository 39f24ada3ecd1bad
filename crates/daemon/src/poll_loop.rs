// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The daemon's poll loop: sweeps the scheduler for ready updates and runs
//! one tick per update, bounded to `tick_workers` concurrent ticks.
//!
//! This is the "outer goal-state engine" the update-run design (§5, §7)
//! treats as a collaborator: at most one outstanding tick per update id
//! (guaranteed by draining `Scheduler::ready_updates` once per sweep and
//! re-enqueueing only after a tick returns), many updates ticking in
//! parallel.

use std::sync::Arc;
use std::time::Instant;

use rollout_adapters::{FakeResMgrClient, Metrics};
use rollout_core::{JobId, UpdateId};
use rollout_engine::{tick, Scheduler, TickContext};
use rollout_storage::{FakeJobStore, FakeTaskStore};
use tokio::task::JoinSet;

use crate::registry::SharedRegistry;

/// Everything one poll sweep needs. Holds the fake store/adapter
/// implementations: the real persistent stores and resource-manager client
/// are external collaborators this crate does not own (§6 of the design),
/// so the daemon binary runs the tick pipeline against in-memory stand-ins.
#[derive(Clone)]
pub struct Daemon {
    pub registry: SharedRegistry,
    pub scheduler: Arc<Scheduler>,
    pub metrics: Arc<Metrics>,
    pub job_store: Arc<FakeJobStore>,
    pub task_store: Arc<FakeTaskStore>,
    pub res_mgr: Arc<FakeResMgrClient>,
    pub tick_workers: usize,
}

impl Daemon {
    pub fn new(tick_workers: usize) -> Self {
        Daemon {
            registry: Default::default(),
            scheduler: Arc::new(Scheduler::new()),
            metrics: Arc::new(Metrics::new()),
            job_store: Arc::new(FakeJobStore::new()),
            task_store: Arc::new(FakeTaskStore::new()),
            res_mgr: Arc::new(FakeResMgrClient::new()),
            tick_workers,
        }
    }

    /// Drain every update whose deadline has passed and tick each, at most
    /// `tick_workers` running concurrently. Returns the number ticked.
    pub async fn sweep(&self, now: Instant) -> usize {
        let ready = self.scheduler.ready_updates(now);
        if ready.is_empty() {
            return 0;
        }

        let mut queued = ready.into_iter();
        let mut in_flight = JoinSet::new();
        let mut ticked = 0usize;

        for (job_id, update_id) in queued.by_ref().take(self.tick_workers) {
            in_flight.spawn(self.clone().run_one(job_id, update_id));
        }

        while in_flight.join_next().await.is_some() {
            ticked += 1;
            if let Some((job_id, update_id)) = queued.next() {
                in_flight.spawn(self.clone().run_one(job_id, update_id));
            }
        }

        ticked
    }

    async fn run_one(self, job_id: JobId, update_id: UpdateId) {
        let Some((job, update)) = self.registry.get(&update_id) else {
            tracing::warn!(%job_id, %update_id, "ready update not found in registry, dropping");
            return;
        };

        let ctx = TickContext {
            job: &job,
            update: &update,
            job_store: self.job_store.as_ref(),
            task_store: self.task_store.as_ref(),
            res_mgr: self.res_mgr.as_ref(),
            engine: self.scheduler.as_ref(),
            metrics: self.metrics.as_ref(),
        };

        match tick(&ctx).await {
            Ok(()) => tracing::debug!(%job_id, %update_id, "tick complete"),
            Err(e) => tracing::error!(%job_id, %update_id, error = %e, "tick failed"),
        }
    }
}

#[cfg(test)]
#[path = "poll_loop_tests.rs"]
mod tests;
