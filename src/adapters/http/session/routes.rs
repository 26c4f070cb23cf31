//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    chat_session, crawl_session, create_session, delete_session, edit_section, get_session,
    SessionHandlers,
};

/// Creates the session router with all endpoints.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(delete_session))
        .route("/sessions/:id/crawl", post(crawl_session))
        .route("/sessions/:id/chat", post(chat_session))
        .route("/sessions/:id/sections/:key", put(edit_section))
        .with_state(handlers)
}
