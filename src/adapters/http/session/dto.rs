//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::session::{ChatSessionResult, CrawlSessionResult};
use crate::domain::conversation::ChatMessage;
use crate::domain::document::VisionDocument;
use crate::domain::foundation::SectionKey;
use crate::domain::session::FormSession;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SessionCrawlRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionChatRequest {
    pub message: String,
}

/// Manual edit of one section. Text that parses as a JSON array is stored
/// as a list.
#[derive(Debug, Clone, Deserialize)]
pub struct EditSectionRequest {
    pub text: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full client view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub document: VisionDocument,
    pub transcript: Vec<ChatMessage>,
    pub active_section: SectionKey,
    pub last_updated_by_ai: Option<SectionKey>,
    pub progress: u8,
    pub crawl_in_flight: bool,
    pub chat_in_flight: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&FormSession> for SessionResponse {
    fn from(session: &FormSession) -> Self {
        Self {
            id: session.id().to_string(),
            document: session.document().clone(),
            transcript: session.transcript().messages().to_vec(),
            active_section: session.active_section(),
            last_updated_by_ai: session.last_updated_by_ai(),
            progress: session.progress().value(),
            crawl_in_flight: session.crawl_in_flight(),
            chat_in_flight: session.chat_in_flight(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCrawlResponse {
    /// Sections that received synthesized content.
    pub replaced: Vec<SectionKey>,
    pub session: SessionResponse,
}

impl From<CrawlSessionResult> for SessionCrawlResponse {
    fn from(result: CrawlSessionResult) -> Self {
        Self {
            replaced: result.replaced,
            session: SessionResponse::from(&result.session),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionChatResponse {
    pub reply: String,
    pub section: Option<SectionKey>,
    pub committed: bool,
    /// False when a newer chat turn superseded this one.
    pub applied: bool,
    pub session: SessionResponse,
}

impl From<ChatSessionResult> for SessionChatResponse {
    fn from(result: ChatSessionResult) -> Self {
        Self {
            reply: result.reply,
            section: result.section,
            committed: result.committed,
            applied: result.applied,
            session: SessionResponse::from(&result.session),
        }
    }
}
