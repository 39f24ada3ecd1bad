// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory directory from update id to its `(JobCache, UpdateCache)` pair
//! — the "shared driver" lookup the orchestrator's `TickContext` assumes has
//! already happened (§4.7, §9 cyclic-reference note). Owned by the daemon,
//! not the engine: the engine only ever sees one resolved update at a time.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rollout_core::UpdateId;
use rollout_storage::{JobCache, UpdateCache};

#[derive(Clone)]
struct Entry {
    job: JobCache,
    update: UpdateCache,
}

/// Shared, lock-protected map keyed by update id. Job caches are looked up
/// indirectly through the update's own `job_id()` at tick time, not kept in
/// a separate map — mirrors the core's two-independent-maps design (§9).
#[derive(Default)]
pub struct Registry {
    entries: Mutex<HashMap<UpdateId, Entry>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn register(&self, job: JobCache, update: UpdateCache) {
        let id = update.id();
        self.entries.lock().insert(id, Entry { job, update });
    }

    pub fn unregister(&self, update_id: &UpdateId) {
        self.entries.lock().remove(update_id);
    }

    pub fn get(&self, update_id: &UpdateId) -> Option<(JobCache, UpdateCache)> {
        self.entries
            .lock()
            .get(update_id)
            .map(|entry| (entry.job.clone(), entry.update.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type SharedRegistry = Arc<Registry>;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
