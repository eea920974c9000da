// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Per-application async locks.
//!
//! Use cases that load, mutate and save an application hold its lock for the
//! whole sequence. The guard releases on drop, so every exit path (early
//! return, `?`, panic unwinding) unlocks.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::certification::CertificationApplicationId;

#[derive(Clone, Default)]
pub struct ApplicationLocks {
    locks: Arc<DashMap<CertificationApplicationId, Arc<Mutex<()>>>>,
}

impl ApplicationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one application
    pub async fn acquire(&self, id: CertificationApplicationId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        // The map shard guard is dropped above, before awaiting
        lock.lock_owned().await
    }

    /// Drop entries nobody holds or waits on
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
