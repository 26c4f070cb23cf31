//! RefineSectionHandler - classify a chat message and coach that section.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::services::{ConversationCoach, IntentClassifier};
use crate::domain::conversation::{latest_user_message, ChatMessage, Classification};
use crate::domain::document::{sections_from_json, VisionDocument};
use crate::domain::foundation::SectionKey;
use crate::ports::{AIError, AIProvider};

/// Error text returned when the classifier gives no usable label.
pub const UNRECOGNIZED_SECTION_ERROR: &str = "Could not determine which section to work on.";

/// Reply shown when the classifier gives no usable label.
pub const CLARIFICATION_REPLY: &str =
    "Hmm, I couldn't quite tell which section that message applies to. Could you clarify?";

/// Command carrying the chat so far and the client's current sections.
#[derive(Debug, Clone)]
pub struct RefineSectionCommand {
    pub messages: Vec<ChatMessage>,
    pub context: Map<String, Value>,
}

/// Outcome of one refinement turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineOutcome {
    /// The message was about `section` and the coach replied.
    Refined { section: SectionKey, reply: String },
    /// The classifier could not name a section.
    Unrecognized,
}

impl RefineOutcome {
    pub fn classification(&self) -> Classification {
        match self {
            RefineOutcome::Refined { section, .. } => Classification::Section(*section),
            RefineOutcome::Unrecognized => Classification::Unrecognized,
        }
    }

    /// Reply to show the user.
    pub fn reply(&self) -> &str {
        match self {
            RefineOutcome::Refined { reply, .. } => reply,
            RefineOutcome::Unrecognized => CLARIFICATION_REPLY,
        }
    }
}

pub struct RefineSectionHandler {
    classifier: IntentClassifier,
    coach: ConversationCoach,
}

impl RefineSectionHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            classifier: IntentClassifier::new(ai_provider.clone()),
            coach: ConversationCoach::new(ai_provider),
        }
    }

    pub async fn handle(&self, cmd: RefineSectionCommand) -> Result<RefineOutcome, AIError> {
        let document = VisionDocument::from_partial(sections_from_json(&cmd.context));
        self.refine(&cmd.messages, &document).await
    }

    /// Classifies the latest user message and, if it names a section,
    /// coaches that section against `document`.
    pub async fn refine(
        &self,
        messages: &[ChatMessage],
        document: &VisionDocument,
    ) -> Result<RefineOutcome, AIError> {
        let latest = latest_user_message(messages);
        let section = match self.classifier.classify(latest).await? {
            Classification::Section(section) => section,
            Classification::Unrecognized => {
                tracing::info!("Chat message did not map to a section");
                return Ok(RefineOutcome::Unrecognized);
            }
        };

        let reply = self.coach.coach(section, document, messages).await?;
        tracing::info!(section = %section, chars = reply.chars().count(), "Coached section");
        Ok(RefineOutcome::Refined { section, reply })
    }
}
