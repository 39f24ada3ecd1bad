use std::collections::HashMap;
use std::time::{Duration, Instant};

use rollout_core::test_support::UpdateBuilder;
use rollout_core::{JobConfig, JobGoalState, JobRuntime, JobType, TaskConfig};
use rollout_storage::JobCache;

use super::*;

fn seed_job(daemon: &Daemon, job_id: &str, instance_count: u32) -> JobCache {
    let config = JobConfig {
        job_id: rollout_core::JobId::new(job_id),
        version: 1,
        job_type: JobType::Service,
        instance_count,
        default_config: TaskConfig::default(),
        instance_config: HashMap::new(),
    };
    daemon.job_store.seed(config.clone(), Default::default());
    JobCache::new(
        config,
        JobRuntime {
            goal_state: JobGoalState::Running,
        },
    )
}

#[tokio::test]
async fn sweep_with_nothing_ready_ticks_nothing() {
    let daemon = Daemon::new(4);
    assert_eq!(daemon.sweep(Instant::now()).await, 0);
}

#[tokio::test]
async fn sweep_ticks_a_registered_ready_update() {
    let daemon = Daemon::new(4);
    let job = seed_job(&daemon, "job-1", 3);
    let update = rollout_storage::UpdateCache::new(
        UpdateBuilder::new("u1", "job-1", vec![0, 1, 2])
            .added(vec![0, 1, 2])
            .job_version(1)
            .build(),
    );
    let update_id = update.id();
    daemon.registry.register(job, update.clone());
    daemon.scheduler.enqueue_update(rollout_core::JobId::new("job-1"), update_id, Instant::now());

    let ticked = daemon.sweep(Instant::now() + Duration::from_millis(1)).await;

    assert_eq!(ticked, 1);
    assert_eq!(update.snapshot().instances_current, vec![0, 1, 2]);
}

#[tokio::test]
async fn sweep_drops_a_ready_update_missing_from_the_registry() {
    let daemon = Daemon::new(4);
    daemon
        .scheduler
        .enqueue_update(rollout_core::JobId::new("job-1"), rollout_core::UpdateId::new("ghost"), Instant::now());

    let ticked = daemon.sweep(Instant::now() + Duration::from_millis(1)).await;

    assert_eq!(ticked, 1);
}
