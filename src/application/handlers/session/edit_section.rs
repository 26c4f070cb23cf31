//! EditSectionHandler - save text the founder typed into a section.

use std::sync::Arc;

use crate::domain::foundation::{SectionKey, SessionId};
use crate::domain::session::FormSession;
use crate::ports::SessionStore;

use super::{SessionCommandError, SessionLocks};

#[derive(Debug, Clone)]
pub struct EditSectionCommand {
    pub session_id: SessionId,
    pub section: SectionKey,
    pub text: String,
}

pub struct EditSectionHandler {
    store: Arc<dyn SessionStore>,
    locks: SessionLocks,
}

impl EditSectionHandler {
    pub fn new(store: Arc<dyn SessionStore>, locks: SessionLocks) -> Self {
        Self { store, locks }
    }

    pub async fn handle(&self, cmd: EditSectionCommand) -> Result<FormSession, SessionCommandError> {
        let _guard = self.locks.acquire(cmd.session_id).await;
        let mut session = self.store.load(cmd.session_id).await?;
        session.edit_section(cmd.section, &cmd.text);
        self.store.save(&session).await?;
        tracing::debug!(session_id = %cmd.session_id, section = %cmd.section, "Section edited");
        Ok(session)
    }
}
