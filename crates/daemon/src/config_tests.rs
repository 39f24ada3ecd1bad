use std::path::PathBuf;
use std::time::Duration;

use super::*;

fn config(default_batch_size: u32) -> DaemonConfig {
    DaemonConfig {
        state_dir: PathBuf::from("/tmp/rollout-test"),
        log_path: PathBuf::from("/tmp/rollout-test/rollout-daemon.log"),
        log_level: "info".to_string(),
        tick_workers: 4,
        default_batch_size,
        poll_interval: Duration::from_millis(250),
    }
}

#[test]
fn default_update_config_carries_the_configured_batch_size() {
    let cfg = config(25).default_update_config();
    assert_eq!(cfg.batch_size, 25);
    assert_eq!(cfg.max_failure_instances, 0);
    assert!(!cfg.rollback_on_failure);
}
