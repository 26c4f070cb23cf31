//! Per-session mutation locks.
//!
//! Every read-modify-write of a stored session happens while holding that
//! session's lock, so a progress tick never overwrites a settled chat turn.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

#[derive(Debug, Clone, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `id`.
    pub async fn acquire(&self, id: SessionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry for a deleted session.
    pub async fn forget(&self, id: SessionId) {
        self.locks.lock().await.remove(&id);
    }
}
