//! HTTP routes for the stateless drafting endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    generate_from_website, generate_vision_to_values, rendered_crawl, v2v_chat, vision_chat,
    DraftingHandlers,
};

/// Creates the drafting router.
pub fn drafting_routes(handlers: DraftingHandlers) -> Router {
    Router::new()
        .route("/generate-from-website", post(generate_from_website))
        .route("/rendered-crawl", post(rendered_crawl))
        .route("/generate-vision-to-values", post(generate_vision_to_values))
        .route("/v2v-chat", post(v2v_chat))
        .route("/vision-chat", post(vision_chat))
        .with_state(handlers)
}
