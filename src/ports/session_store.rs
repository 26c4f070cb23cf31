//! Session Store Port - Keeps drafting sessions between requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::SessionId;
use crate::domain::session::FormSession;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for saving and loading form sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Save a session, replacing any previous version
    async fn save(&self, session: &FormSession) -> Result<(), SessionStoreError>;

    /// Load a session
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session exists
    async fn load(&self, id: SessionId) -> Result<FormSession, SessionStoreError>;

    /// Check whether a session exists
    async fn exists(&self, id: SessionId) -> Result<bool, SessionStoreError>;

    /// Delete a session. Returns true if it existed.
    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError>;

    /// Remove sessions last updated before `cutoff`.
    ///
    /// Sessions with a crawl or chat request in flight are kept. Returns
    /// the ids that were removed.
    async fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionId>, SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_session() {
        let id = SessionId::new();
        let err = SessionStoreError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
