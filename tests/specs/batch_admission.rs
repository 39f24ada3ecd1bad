//! §8 scenarios 1–2: batch-size admission and add→update→remove priority.

use crate::support::{builder, snapshot, Fixture};

/// Scenario 1. Pure add, batch size 3 of 10: only the first three are
/// dispatched and written back as `current`.
#[tokio::test]
async fn pure_add_admits_only_batch_size_many() {
    let fixture = Fixture::new("job-1", 10);
    let update = fixture.update(
        builder("u1", "job-1", Fixture::instance_ids(10))
            .added(Fixture::instance_ids(10))
            .batch_size(3),
    );

    fixture.tick(&update).await.unwrap();

    assert_eq!(snapshot(&update).instances_current, vec![0, 1, 2]);
    assert_eq!(fixture.res_mgr.submitted().len(), 3);
}

/// Scenario 2. Add, update, and remove sets all present with batch size 5:
/// admission fills add first, then update, then remove, truncating the
/// remove set rather than reordering across categories.
#[tokio::test]
async fn admission_prioritizes_add_then_update_then_remove() {
    let fixture = Fixture::new("job-1", 6);

    // Instances 2 and 3 need an in-place update: seed a stale runtime so
    // the dispatcher has a non-empty diff to apply and an existing handle
    // to patch.
    for id in [2u32, 3] {
        fixture.job.seed_task(id, rollout_core::TaskRuntime::initializing(4));
    }
    // Instances 4 and 5 are being removed: give them a runtime so the
    // status confirmer doesn't short-circuit them straight to `done`.
    for id in [4u32, 5] {
        fixture.job.seed_task(id, rollout_core::TaskRuntime::initializing(5));
    }

    let update = fixture.update(
        builder("u1", "job-1", Fixture::instance_ids(6))
            .added(vec![0, 1])
            .updated(vec![2, 3])
            .removed(vec![4, 5])
            .batch_size(5),
    );

    fixture.tick(&update).await.unwrap();

    let after = snapshot(&update);
    // add {0,1} + update {2,3} + remove {4} = 5, the batch size.
    assert_eq!(after.instances_current, vec![0, 1, 2, 3, 4]);
}
