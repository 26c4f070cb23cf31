//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    EditSectionRequest, SessionChatRequest, SessionChatResponse, SessionCrawlRequest,
    SessionCrawlResponse, SessionResponse,
};
pub use handlers::SessionHandlers;
pub use routes::session_routes;
