//! §8 scenarios 3, 4, 7: reconciliation against live task state before
//! dispatch.

use rollout_core::{TaskGoalState, TaskRuntime};

use crate::support::{builder, snapshot, Fixture};

/// Scenario 3. The planner schedules instance 7 as an add, but its live
/// runtime already exists at a stale config version — the confirmer
/// reclassifies it to an update, and the dispatcher patches it rather than
/// synthesizing a fresh runtime.
#[tokio::test]
async fn planned_add_with_a_stale_live_runtime_becomes_an_update() {
    let fixture = Fixture::new("job-1", 8);
    fixture.job.seed_task(7, TaskRuntime::initializing(4));

    let update = fixture.update(builder("u1", "job-1", vec![7]).added(vec![7]));

    fixture.tick(&update).await.unwrap();

    // Reclassified to an update: no launch submitted to the resource
    // manager, and the runtime's config was patched toward the target.
    assert_eq!(fixture.res_mgr.submitted().len(), 0);
    let patched = fixture.job.get_task(7).unwrap().get_runtime().unwrap();
    assert_eq!(patched.desired_config_version, 5);
    assert_eq!(snapshot(&update).instances_current, vec![7]);
}

/// Scenario 4. Instance 9 is planned for removal but the task is already
/// gone (instance id beyond the job's current instance count) — it is
/// folded straight into `done` with no dispatch.
#[tokio::test]
async fn already_removed_instance_is_marked_done_without_dispatch() {
    let fixture = Fixture::new("job-1", 9); // instance 9 is now out of range
    let update = fixture.update(builder("u1", "job-1", vec![9]).removed(vec![9]));

    fixture.tick(&update).await.unwrap();

    let after = snapshot(&update);
    assert_eq!(after.instances_done, vec![9]);
    assert!(after.instances_current.is_empty());
    assert_eq!(fixture.res_mgr.submitted().len(), 0);
}

/// Scenario 7. Instance 3's runtime is currently goal-stated DELETED (it
/// was previously removed); reviving it via an in-place update must force
/// the goal state back to RUNNING in addition to the base config diff.
#[tokio::test]
async fn updating_a_deleted_instance_revives_its_goal_state() {
    let fixture = Fixture::new("job-1", 4);
    let mut deleted = TaskRuntime::initializing(3);
    deleted.goal_state = TaskGoalState::Deleted;
    fixture.job.seed_task(3, deleted);

    let update = fixture.update(builder("u1", "job-1", vec![3]).updated(vec![3]));

    fixture.tick(&update).await.unwrap();

    let patched = fixture.job.get_task(3).unwrap().get_runtime().unwrap();
    assert_eq!(patched.goal_state, TaskGoalState::Running);
    assert_eq!(patched.desired_config_version, 5);
}
