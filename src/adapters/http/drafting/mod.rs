//! HTTP adapter for the stateless drafting endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ContentResponse, CrawlRequest, ReplyResponse, SectionChatRequest, SectionChatResponse,
    SectionsResponse, VisionChatRequest,
};
pub use handlers::DraftingHandlers;
pub use routes::drafting_routes;
