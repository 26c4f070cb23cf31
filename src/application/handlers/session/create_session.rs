//! CreateSessionHandler - start a new drafting session.

use std::sync::Arc;

use crate::domain::session::FormSession;
use crate::ports::SessionStore;

use super::SessionCommandError;

pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Creates a session with an all-`"TBD"` document and the welcome message.
    pub async fn handle(&self) -> Result<FormSession, SessionCommandError> {
        let session = FormSession::new();
        self.store.save(&session).await?;
        tracing::info!(session_id = %session.id(), "Session created");
        Ok(session)
    }
}
