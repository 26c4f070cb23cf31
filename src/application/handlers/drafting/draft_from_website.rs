//! DraftFromWebsiteHandler - crawl a site and pre-fill the seven sections.

use std::sync::Arc;

use thiserror::Error;

use crate::application::services::SectionSynthesizer;
use crate::domain::document::VisionDocument;
use crate::domain::extraction::{has_sufficient_signal, is_crawlable_url, normalize_url};
use crate::domain::synthesis::document_from_reply;
use crate::ports::{AIError, AIProvider, TextExtractor};

/// Errors that can occur while drafting from a website.
#[derive(Debug, Error)]
pub enum DraftError {
    /// URL failed the crawlable-URL check.
    #[error("Invalid URL")]
    InvalidUrl,

    /// The language model call failed.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),
}

/// Command to draft a document from a website.
#[derive(Debug, Clone)]
pub struct DraftFromWebsiteCommand {
    pub url: String,
}

/// Result of drafting.
#[derive(Debug, Clone)]
pub struct DraftFromWebsiteResult {
    /// All seven sections; `"TBD"` where nothing could be inferred.
    pub document: VisionDocument,
    /// Characters of site text that were extracted.
    pub extracted_chars: usize,
    /// False when the model was skipped for lack of content.
    pub synthesized: bool,
}

/// Runs extraction, synthesis, and decoding for one crawl strategy.
pub struct DraftFromWebsiteHandler {
    extractor: Arc<dyn TextExtractor>,
    synthesizer: SectionSynthesizer,
    instruction: String,
    min_content_chars: usize,
    validate_url: bool,
}

impl DraftFromWebsiteHandler {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        ai_provider: Arc<dyn AIProvider>,
        instruction: impl Into<String>,
        min_content_chars: usize,
    ) -> Self {
        Self {
            extractor,
            synthesizer: SectionSynthesizer::new(ai_provider),
            instruction: instruction.into(),
            min_content_chars,
            validate_url: false,
        }
    }

    /// Rejects URLs that fail the crawlable-URL check before extracting.
    pub fn with_url_validation(mut self) -> Self {
        self.validate_url = true;
        self
    }

    pub async fn handle(
        &self,
        cmd: DraftFromWebsiteCommand,
    ) -> Result<DraftFromWebsiteResult, DraftError> {
        let url = normalize_url(&cmd.url);
        if self.validate_url && !is_crawlable_url(&url) {
            return Err(DraftError::InvalidUrl);
        }

        let text = self.extractor.extract(&url).await;
        let extracted_chars = text.chars().count();

        if !has_sufficient_signal(&text, self.min_content_chars) {
            tracing::info!(
                url = %url,
                chars = extracted_chars,
                strategy = self.extractor.strategy(),
                "Too little site text, returning placeholder draft"
            );
            return Ok(DraftFromWebsiteResult {
                document: VisionDocument::placeholder(),
                extracted_chars,
                synthesized: false,
            });
        }

        let reply = self.synthesizer.synthesize(&text, &self.instruction).await?;
        let document = document_from_reply(&reply);

        tracing::info!(
            url = %url,
            chars = extracted_chars,
            strategy = self.extractor.strategy(),
            filled = document.filled_sections().count(),
            "Drafted sections from website"
        );

        Ok(DraftFromWebsiteResult {
            document,
            extracted_chars,
            synthesized: true,
        })
    }
}
