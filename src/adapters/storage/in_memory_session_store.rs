//! In-Memory Session Store Adapter
//!
//! Keeps drafting sessions in process memory. Sessions are lost on restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::session::FormSession;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for form sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, FormSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &FormSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<FormSession, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn exists(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.read().await.contains_key(&id))
    }

    async fn delete(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }

    async fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<Vec<SessionId>, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let idle: Vec<SessionId> = sessions
            .values()
            .filter(|s| s.updated_at() < cutoff && !s.crawl_in_flight() && !s.chat_in_flight())
            .map(FormSession::id)
            .collect();
        for id in &idle {
            sessions.remove(id);
        }
        Ok(idle)
    }
}
