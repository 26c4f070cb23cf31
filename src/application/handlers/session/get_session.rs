//! GetSessionHandler - read a session's current state.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::FormSession;
use crate::ports::SessionStore;

use super::SessionCommandError;

pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, id: SessionId) -> Result<FormSession, SessionCommandError> {
        Ok(self.store.load(id).await?)
    }
}
