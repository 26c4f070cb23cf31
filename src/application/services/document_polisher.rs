//! Document Polisher - rewrites the founder's sections as HTML.

use std::sync::Arc;

use crate::domain::document::SectionMap;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

use super::prompts::polish_prompt;

/// Content used when the model returns nothing.
pub const POLISH_FALLBACK_CONTENT: &str = "<p>No content generated.</p>";

pub struct DocumentPolisher {
    ai_provider: Arc<dyn AIProvider>,
}

impl DocumentPolisher {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Returns `<h2>`/`<p>` markup for the non-blank sections provided.
    pub async fn polish(&self, sections: &SectionMap) -> Result<String, AIError> {
        let request = CompletionRequest::new(RequestMetadata::new("polish"))
            .with_message(MessageRole::User, polish_prompt(&polish_summary(sections)));

        let response = self.ai_provider.complete(request).await?;
        Ok(response
            .non_empty_content()
            .unwrap_or(POLISH_FALLBACK_CONTENT)
            .to_string())
    }
}

/// Renders provided sections as `### Label` blocks in display order.
///
/// Blank sections are left out. `"TBD"` is the founder's text like any
/// other and is kept.
pub fn polish_summary(sections: &SectionMap) -> String {
    sections
        .iter()
        .map(|(key, value)| (key, value.render_block()))
        .filter(|(_, block)| !block.is_empty())
        .map(|(key, block)| format!("### {}\n\n{}", key.display_name(), block))
        .collect::<Vec<_>>()
        .join("\n\n")
}
