//! Errors shared by the session command handlers.

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::{AIError, SessionStoreError};

#[derive(Debug, Error)]
pub enum SessionCommandError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Invalid URL")]
    InvalidUrl,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for SessionCommandError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => SessionCommandError::NotFound(id),
            SessionStoreError::Storage(message) => SessionCommandError::Storage(message),
        }
    }
}
