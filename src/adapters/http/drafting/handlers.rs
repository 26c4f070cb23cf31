//! HTTP handlers for the stateless drafting endpoints.
//!
//! Each endpoint is one request/response cycle; the client owns the
//! document and the transcript.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::adapters::http::error::{ApiError, ApiJson};
use crate::application::handlers::drafting::{
    DraftError, DraftFromWebsiteCommand, DraftFromWebsiteHandler, PolishDocumentHandler,
    RefineOutcome, RefineSectionCommand, RefineSectionHandler, VisionChatHandler,
    UNRECOGNIZED_SECTION_ERROR,
};

use super::dto::{
    ContentResponse, CrawlRequest, ReplyResponse, SectionChatRequest, SectionChatResponse,
    SectionsResponse, VisionChatRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DraftingHandlers {
    website_drafter: Arc<DraftFromWebsiteHandler>,
    rendered_drafter: Arc<DraftFromWebsiteHandler>,
    polisher: Arc<PolishDocumentHandler>,
    refiner: Arc<RefineSectionHandler>,
    vision_chat: Arc<VisionChatHandler>,
}

impl DraftingHandlers {
    pub fn new(
        website_drafter: Arc<DraftFromWebsiteHandler>,
        rendered_drafter: Arc<DraftFromWebsiteHandler>,
        polisher: Arc<PolishDocumentHandler>,
        refiner: Arc<RefineSectionHandler>,
        vision_chat: Arc<VisionChatHandler>,
    ) -> Self {
        Self {
            website_drafter,
            rendered_drafter,
            polisher,
            refiner,
            vision_chat,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /generate-from-website - static fetch, then synthesize
pub async fn generate_from_website(
    State(handlers): State<DraftingHandlers>,
    ApiJson(req): ApiJson<CrawlRequest>,
) -> Result<Json<SectionsResponse>, ApiError> {
    draft(&handlers.website_drafter, req, "Failed to generate").await
}

/// POST /rendered-crawl - headless browser crawl, then synthesize
pub async fn rendered_crawl(
    State(handlers): State<DraftingHandlers>,
    ApiJson(req): ApiJson<CrawlRequest>,
) -> Result<Json<SectionsResponse>, ApiError> {
    draft(&handlers.rendered_drafter, req, "Crawl failed").await
}

async fn draft(
    drafter: &DraftFromWebsiteHandler,
    req: CrawlRequest,
    failure: &str,
) -> Result<Json<SectionsResponse>, ApiError> {
    let cmd = DraftFromWebsiteCommand { url: req.url };
    match drafter.handle(cmd).await {
        Ok(result) => Ok(Json(SectionsResponse {
            sections: result.document,
        })),
        Err(DraftError::InvalidUrl) => Err(ApiError::bad_request("Invalid URL")),
        Err(DraftError::Provider(err)) => {
            tracing::error!(error = %err, "Drafting from website failed");
            Err(ApiError::internal(failure))
        }
    }
}

/// POST /generate-vision-to-values - polish the sections into HTML
pub async fn generate_vision_to_values(
    State(handlers): State<DraftingHandlers>,
    ApiJson(sections): ApiJson<Map<String, Value>>,
) -> Result<Json<ContentResponse>, ApiError> {
    match handlers.polisher.handle(&sections).await {
        Ok(content) => Ok(Json(ContentResponse { content })),
        Err(err) => {
            tracing::error!(error = %err, "Polishing document failed");
            Err(ApiError::internal("Failed to generate content"))
        }
    }
}

/// POST /v2v-chat - classify the latest message and coach that section
pub async fn v2v_chat(
    State(handlers): State<DraftingHandlers>,
    ApiJson(req): ApiJson<SectionChatRequest>,
) -> Response {
    let cmd = RefineSectionCommand {
        messages: req.messages,
        context: req.context,
    };

    match handlers.refiner.handle(cmd).await {
        Ok(RefineOutcome::Refined { section, reply }) => {
            (StatusCode::OK, Json(SectionChatResponse { reply, section })).into_response()
        }
        // Unrecognized sections are a normal turn, not a failure.
        Ok(outcome @ RefineOutcome::Unrecognized) => {
            let body = ApiError::new(StatusCode::OK, UNRECOGNIZED_SECTION_ERROR)
                .with_reply(outcome.reply());
            body.into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Section chat failed");
            ApiError::internal("Failed to generate response").into_response()
        }
    }
}

/// POST /vision-chat - free-form chat with the Vision persona
pub async fn vision_chat(
    State(handlers): State<DraftingHandlers>,
    ApiJson(req): ApiJson<VisionChatRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    match handlers.vision_chat.handle(&req.messages).await {
        Ok(reply) => Ok(Json(ReplyResponse { reply })),
        Err(err) => {
            tracing::error!(error = %err, "Vision chat failed");
            Err(ApiError::internal("Failed to generate reply."))
        }
    }
}
