//! HTTP DTOs for the stateless drafting endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::conversation::ChatMessage;
use crate::domain::document::VisionDocument;
use crate::domain::foundation::SectionKey;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of both crawl endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlRequest {
    #[serde(default)]
    pub url: String,
}

/// Body of `/v2v-chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionChatRequest {
    pub messages: Vec<ChatMessage>,
    /// The client's current sections; missing keys are treated as `"TBD"`.
    #[serde(default)]
    pub context: Map<String, Value>,
}

/// Body of `/vision-chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct VisionChatRequest {
    pub messages: Vec<ChatMessage>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct SectionsResponse {
    pub sections: VisionDocument,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionChatResponse {
    pub reply: String,
    pub section: SectionKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}
