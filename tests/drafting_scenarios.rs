//! End-to-end scenarios for the stateless drafting endpoints.
//!
//! Each test drives the full router with a scripted model and a canned
//! website, checking what a browser client would see.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use vision_to_values::adapters::ai::MockAIProvider;
use vision_to_values::adapters::http::{app_router, DraftingHandlers, SessionHandlers};
use vision_to_values::adapters::storage::InMemorySessionStore;
use vision_to_values::application::handlers::drafting::{
    DraftFromWebsiteHandler, PolishDocumentHandler, RefineSectionHandler, VisionChatHandler,
};
use vision_to_values::application::services::prompts;
use vision_to_values::config::ServerConfig;
use vision_to_values::ports::{AIProvider, MessageRole, TextExtractor};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Extractor that returns fixed text and records requested URLs.
struct CannedSite {
    text: String,
    requested: std::sync::Mutex<Vec<String>>,
}

impl CannedSite {
    fn new(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            text: text.into(),
            requested: std::sync::Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextExtractor for CannedSite {
    async fn extract(&self, url: &str) -> String {
        self.requested.lock().unwrap().push(url.to_string());
        self.text.clone()
    }

    fn strategy(&self) -> &'static str {
        "canned"
    }
}

fn build_app(mock: &MockAIProvider, site: Arc<CannedSite>) -> Router {
    let ai: Arc<dyn AIProvider> = Arc::new(mock.clone());
    let website = Arc::new(DraftFromWebsiteHandler::new(
        site.clone(),
        ai.clone(),
        prompts::website_synthesis_prompt(),
        100,
    ));
    let rendered = Arc::new(
        DraftFromWebsiteHandler::new(site, ai.clone(), prompts::rendered_synthesis_prompt(), 100)
            .with_url_validation(),
    );
    let refiner = Arc::new(RefineSectionHandler::new(ai.clone()));

    let drafting = DraftingHandlers::new(
        website,
        rendered.clone(),
        Arc::new(PolishDocumentHandler::new(ai.clone())),
        refiner.clone(),
        Arc::new(VisionChatHandler::new(ai)),
    );
    let sessions = SessionHandlers::new(Arc::new(InMemorySessionStore::new()), rendered, refiner);
    app_router(drafting, sessions, &ServerConfig::default())
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const SITE_TEXT: &str = "Lumen Health builds low-cost diagnostic kits for community clinics. \
    Our team partners with ministries of health to reach patients in remote regions.";

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn empty_extraction_yields_all_placeholder_sections() {
    let mock = MockAIProvider::new();
    let site = CannedSite::new("");
    let (status, body) = post_json(
        build_app(&mock, site.clone()),
        "/generate-from-website",
        json!({"url": "lumen.example"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"sections": {
            "vision": "TBD", "mission": "TBD", "strategy": "TBD", "objectives": "TBD",
            "priorities": "TBD", "culture": "TBD", "values": "TBD"
        }})
    );
    assert_eq!(mock.call_count(), 0);
    assert_eq!(site.requested(), vec!["https://lumen.example".to_string()]);
}

#[tokio::test]
async fn prose_wrapped_reply_is_decoded() {
    let mock = MockAIProvider::new()
        .with_response("Here you go:\n{\"vision\":\"See far\",\"mission\":\"TBD\"}");
    let (status, body) = post_json(
        build_app(&mock, CannedSite::new(SITE_TEXT)),
        "/rendered-crawl",
        json!({"url": "https://lumen.example"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sections"]["vision"], "See far");
    assert_eq!(body["sections"]["mission"], "TBD");
    assert_eq!(body["sections"]["values"], "TBD");

    let call = mock.last_call().unwrap();
    assert_eq!(call.messages.len(), 2);
    assert_eq!(call.messages[0].role, MessageRole::System);
    assert!(call.messages[1].content.contains("diagnostic kits"));
}

#[tokio::test]
async fn culture_message_is_routed_with_full_context() {
    let mock = MockAIProvider::new()
        .with_response("culture")
        .with_response("What does transparency look like on a hard day?");
    let (status, body) = post_json(
        build_app(&mock, CannedSite::new("")),
        "/v2v-chat",
        json!({
            "messages": [
                {"role": "assistant", "content": "Welcome! Just tell me what you want to work on."},
                {"role": "user", "content": "Our culture should emphasize transparency"}
            ],
            "context": {
                "vision": "Diagnostics for every clinic",
                "mission": "Ship kits that cost under a dollar",
                "strategy": "TBD",
                "objectives": ["Reach 500 clinics"],
                "priorities": "",
                "culture": "Open books",
                "values": "TBD"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["section"], "culture");
    assert_eq!(body["reply"], "What does transparency look like on a hard day?");

    let calls = mock.get_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].messages[0]
        .content
        .contains("Our culture should emphasize transparency"));

    let coach_prompt = calls[1].system_prompt().unwrap();
    assert!(coach_prompt.contains("Open books"));
    assert!(coach_prompt.contains("VISION: Diagnostics for every clinic"));
    assert!(coach_prompt.contains("OBJECTIVES: Reach 500 clinics"));
    for key in ["MISSION", "STRATEGY", "PRIORITIES", "VALUES"] {
        assert!(coach_prompt.contains(&format!("{}: ", key)), "missing {}", key);
    }
    assert!(!coach_prompt.contains("CULTURE: "));
}

#[tokio::test]
async fn bare_word_url_is_rejected_on_rendered_path() {
    let mock = MockAIProvider::new();
    let site = CannedSite::new(SITE_TEXT);
    let (status, body) = post_json(
        build_app(&mock, site.clone()),
        "/rendered-crawl",
        json!({"url": "example"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid URL"}));
    assert!(site.requested().is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn completion_reply_commits_section_in_session() {
    let mock = MockAIProvider::new()
        .with_response("mission")
        .with_response("Sounds great, I think that's complete!");
    let app = build_app(&mock, CannedSite::new(""));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sessions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let session: Value = serde_json::from_slice(&bytes).unwrap();
    let id = session["id"].as_str().unwrap();

    let (status, body) = post_json(
        app,
        &format!("/sessions/{}/chat", id),
        json!({"message": "Our mission is cheap diagnostics everywhere"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["committed"], true);
    assert_eq!(
        body["session"]["document"]["mission"],
        "Sounds great, I think that's complete!"
    );
    assert_eq!(body["session"]["last_updated_by_ai"], "mission");
    assert_eq!(body["session"]["active_section"], "mission");
}

#[tokio::test]
async fn polish_includes_only_non_blank_sections() {
    let mock = MockAIProvider::new().with_response("<h2>Vision</h2><p>See far</p>");
    let (status, body) = post_json(
        build_app(&mock, CannedSite::new("")),
        "/generate-vision-to-values",
        json!({"vision": "See far", "mission": "", "culture": "TBD"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "<h2>Vision</h2><p>See far</p>");

    let prompt = &mock.last_call().unwrap().messages[0].content;
    assert!(prompt.contains("### Vision\n\nSee far"));
    assert!(!prompt.contains("### Mission"));
    assert!(prompt.contains("### Culture\n\nTBD"));
}
