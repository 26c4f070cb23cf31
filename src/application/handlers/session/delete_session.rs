//! DeleteSessionHandler - discard a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::{SessionCommandError, SessionLocks};

pub struct DeleteSessionHandler {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
}

impl DeleteSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, locks: SessionLocks) -> Self {
        Self { store, locks }
    }

    pub async fn handle(&self, id: SessionId) -> Result<(), SessionCommandError> {
        let deleted = {
            let _guard = self.locks.acquire(id).await;
            self.store.delete(id).await?
        };
        if !deleted {
            return Err(SessionCommandError::NotFound(id));
        }
        self.locks.forget(id).await;
        tracing::info!(session_id = %id, "Session deleted");
        Ok(())
    }
}
