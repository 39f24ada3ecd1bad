// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two named counters the update-run design (§6) requires: `UpdateRun`
//! and `UpdateRunFail`. No metrics crate appears anywhere in the reference
//! pack for a concern this narrow, so these are hand-rolled `AtomicU64`
//! counters rather than an added dependency.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    update_run: AtomicU64,
    update_run_fail: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_run_inc(&self) {
        self.update_run.fetch_add(1, Ordering::Relaxed);
    }

    pub fn update_run_fail_inc(&self) {
        self.update_run_fail.fetch_add(1, Ordering::Relaxed);
    }

    pub fn update_run(&self) -> u64 {
        self.update_run.load(Ordering::Relaxed)
    }

    pub fn update_run_fail(&self) -> u64 {
        self.update_run_fail.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
