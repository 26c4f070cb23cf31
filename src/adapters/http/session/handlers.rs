//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{ApiError, ApiJson};
use crate::application::handlers::drafting::{DraftFromWebsiteHandler, RefineSectionHandler};
use crate::application::handlers::session::{
    ChatSessionCommand, ChatSessionHandler, CrawlSessionCommand, CrawlSessionHandler,
    CreateSessionHandler, DeleteSessionHandler, EditSectionCommand, EditSectionHandler,
    GetSessionHandler, SessionCommandError, SessionLocks,
};
use crate::domain::foundation::{SectionKey, SessionId};
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

use super::dto::{
    EditSectionRequest, SessionChatRequest, SessionChatResponse, SessionCrawlRequest,
    SessionCrawlResponse, SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    create_handler: Arc<CreateSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    crawl_handler: Arc<CrawlSessionHandler>,
    chat_handler: Arc<ChatSessionHandler>,
    edit_handler: Arc<EditSectionHandler>,
    delete_handler: Arc<DeleteSessionHandler>,
}

impl SessionHandlers {
    /// Wires every session handler to one store and a fresh lock map.
    pub fn new(
        store: Arc<dyn SessionStore>,
        drafter: Arc<DraftFromWebsiteHandler>,
        refiner: Arc<RefineSectionHandler>,
    ) -> Self {
        Self::with_locks(store, SessionLocks::new(), drafter, refiner)
    }

    /// Wires every session handler to one store and a lock map shared with
    /// background work such as the idle sweeper.
    pub fn with_locks(
        store: Arc<dyn SessionStore>,
        locks: SessionLocks,
        drafter: Arc<DraftFromWebsiteHandler>,
        refiner: Arc<RefineSectionHandler>,
    ) -> Self {
        Self {
            create_handler: Arc::new(CreateSessionHandler::new(store.clone())),
            get_handler: Arc::new(GetSessionHandler::new(store.clone())),
            crawl_handler: Arc::new(CrawlSessionHandler::new(
                store.clone(),
                locks.clone(),
                drafter,
            )),
            chat_handler: Arc::new(ChatSessionHandler::new(
                store.clone(),
                locks.clone(),
                refiner,
            )),
            edit_handler: Arc::new(EditSectionHandler::new(store.clone(), locks.clone())),
            delete_handler: Arc::new(DeleteSessionHandler::new(store, locks)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /sessions - Create a new session
pub async fn create_session(State(handlers): State<SessionHandlers>) -> Response {
    match handlers.create_handler.handle().await {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response()
        }
        Err(e) => handle_session_error(e, "Failed to create session"),
    }
}

/// GET /sessions/:id - Get the session's document, transcript, and flags
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers.get_handler.handle(session_id).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_session_error(e, "Failed to load session"),
    }
}

/// POST /sessions/:id/crawl - Crawl a website into the session
pub async fn crawl_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    ApiJson(req): ApiJson<SessionCrawlRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = CrawlSessionCommand {
        session_id,
        url: req.url,
    };

    match handlers.crawl_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(SessionCrawlResponse::from(result))).into_response(),
        Err(e) => handle_session_error(e, "Crawl failed"),
    }
}

/// POST /sessions/:id/chat - Send one chat message
pub async fn chat_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
    ApiJson(req): ApiJson<SessionChatRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    let cmd = ChatSessionCommand {
        session_id,
        message: req.message,
    };

    match handlers.chat_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(SessionChatResponse::from(result))).into_response(),
        Err(e) => handle_session_error(e, "Failed to generate response"),
    }
}

/// PUT /sessions/:id/sections/:key - Manually edit one section
pub async fn edit_section(
    State(handlers): State<SessionHandlers>,
    Path((session_id, key)): Path<(String, String)>,
    ApiJson(req): ApiJson<EditSectionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let section = match key.parse::<SectionKey>() {
        Ok(section) => section,
        Err(_) => {
            return ApiError::bad_request(format!("Unknown section: {}", key)).into_response()
        }
    };

    let cmd = EditSectionCommand {
        session_id,
        section,
        text: req.text,
    };

    match handlers.edit_handler.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_session_error(e, "Failed to save section"),
    }
}

/// DELETE /sessions/:id - Delete a session
pub async fn delete_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match handlers.delete_handler.handle(session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e, "Failed to delete session"),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| ApiError::bad_request("Invalid session ID"))
}

/// Maps a command error to a response; `failure` is the 500 message.
fn handle_session_error(error: SessionCommandError, failure: &str) -> Response {
    let api_error = match error {
        SessionCommandError::NotFound(id) => {
            ApiError::not_found(format!("Session not found: {}", id))
        }
        SessionCommandError::InvalidUrl => ApiError::bad_request("Invalid URL"),
        SessionCommandError::Session(SessionError::EmptyMessage) => {
            ApiError::bad_request("Message cannot be empty")
        }
        SessionCommandError::Session(SessionError::CrawlInFlight) => {
            ApiError::conflict("A website crawl is already in progress")
        }
        SessionCommandError::Session(SessionError::StaleResponse(kind)) => {
            ApiError::conflict(format!("{:?} request was superseded", kind))
        }
        SessionCommandError::Provider(err) => {
            tracing::error!(error = %err, "Session request failed at the provider");
            ApiError::internal(failure)
        }
        SessionCommandError::Storage(message) => {
            tracing::error!(error = %message, "Session storage failed");
            ApiError::internal(failure)
        }
    };
    api_error.into_response()
}
