//! §8 scenario 8: recovering the next run index from pod-event history when
//! an instance is added back from scratch.

use rollout_core::{MesosTaskId, PodEvent};

use crate::support::{builder, Fixture};

#[tokio::test]
async fn adding_an_instance_with_history_continues_its_run_index() {
    let fixture = Fixture::new("job-1", 6);
    fixture.task_store.seed(
        &fixture.job_id,
        5,
        vec![PodEvent {
            pod_id: MesosTaskId::make(&fixture.job_id, 5, 7),
        }],
    );

    let update = fixture.update(builder("u1", "job-1", vec![5]).added(vec![5]));

    fixture.tick(&update).await.unwrap();

    let runtime = fixture.job.get_task(5).unwrap().get_runtime().unwrap();
    let expected_next = MesosTaskId::make(&fixture.job_id, 5, 8);
    assert_eq!(runtime.mesos_task_id, Some(expected_next.clone()));
    assert_eq!(runtime.desired_mesos_task_id, Some(expected_next));
    assert_eq!(runtime.prev_mesos_task_id, Some(MesosTaskId::make(&fixture.job_id, 5, 7)));
}

#[tokio::test]
async fn adding_an_instance_with_no_history_leaves_run_id_unset() {
    let fixture = Fixture::new("job-1", 6);
    let update = fixture.update(builder("u1", "job-1", vec![5]).added(vec![5]));

    fixture.tick(&update).await.unwrap();

    let runtime = fixture.job.get_task(5).unwrap().get_runtime().unwrap();
    assert_eq!(runtime.mesos_task_id, None);
    assert_eq!(runtime.prev_mesos_task_id, None);
}
