//! Shared fixture for the update-run scenario specs.
//!
//! Wires a [`rollout_core::Update`] against a [`rollout_storage::JobCache`]
//! backed by the fake stores/resource-manager client, and exposes a single
//! [`Fixture::tick`] entry point mirroring `rollout_engine::tick`.

#![allow(dead_code)]

use std::collections::HashMap;

use rollout_adapters::{FakeResMgrClient, Metrics};
use rollout_core::test_support::UpdateBuilder;
use rollout_core::{InstanceId, JobConfig, JobGoalState, JobId, JobRuntime, JobType, TaskConfig, Update};
use rollout_engine::{tick, RuntimeError, Scheduler, TickContext};
use rollout_storage::{FakeJobStore, FakeTaskStore, JobCache, UpdateCache};

pub struct Fixture {
    pub job_id: JobId,
    pub job: JobCache,
    pub job_store: FakeJobStore,
    pub task_store: FakeTaskStore,
    pub res_mgr: FakeResMgrClient,
    pub scheduler: Scheduler,
    pub metrics: Metrics,
}

impl Fixture {
    /// A job with `instance_count` instances, currently at config version 5.
    pub fn new(job_id: &str, instance_count: u32) -> Self {
        let job_id = JobId::new(job_id);
        let config = JobConfig {
            job_id: job_id.clone(),
            version: 5,
            job_type: JobType::Service,
            instance_count,
            default_config: TaskConfig::default(),
            instance_config: HashMap::new(),
        };
        let job = JobCache::new(
            config.clone(),
            JobRuntime {
                goal_state: JobGoalState::Running,
            },
        );
        let job_store = FakeJobStore::new();
        job_store.seed(config, Default::default());

        Fixture {
            job_id,
            job,
            job_store,
            task_store: FakeTaskStore::new(),
            res_mgr: FakeResMgrClient::new(),
            scheduler: Scheduler::new(),
            metrics: Metrics::new(),
        }
    }

    pub fn instance_ids(n: u32) -> Vec<InstanceId> {
        (0..n).collect()
    }

    fn ctx<'a>(&'a self, update: &'a UpdateCache) -> TickContext<'a> {
        TickContext {
            job: &self.job,
            update,
            job_store: &self.job_store,
            task_store: &self.task_store,
            res_mgr: &self.res_mgr,
            engine: &self.scheduler,
            metrics: &self.metrics,
        }
    }

    pub async fn tick(&self, update: &UpdateCache) -> Result<(), RuntimeError> {
        tick(&self.ctx(update)).await
    }

    /// Run ticks until the update reaches a terminal state or `max_ticks`
    /// is exhausted, whichever comes first. Mirrors how the outer
    /// goal-state engine re-drives an update across multiple wake-ups.
    pub async fn run_to_completion(&self, update: &UpdateCache, max_ticks: usize) -> usize {
        for n in 0..max_ticks {
            self.tick(update).await.expect("tick should not error in this scenario");
            let snapshot = update.snapshot();
            if snapshot.is_complete() {
                return n + 1;
            }
        }
        max_ticks
    }

    pub fn update(&self, builder: UpdateBuilder) -> UpdateCache {
        UpdateCache::new(builder.build())
    }
}

pub fn builder(update_id: &str, job_id: &str, instances: Vec<InstanceId>) -> UpdateBuilder {
    UpdateBuilder::new(update_id, job_id, instances).job_version(5)
}

pub fn snapshot(update: &UpdateCache) -> Update {
    update.snapshot()
}
