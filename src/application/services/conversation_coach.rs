//! Conversation Coach - produces refinement replies for the chat.

use std::sync::Arc;

use crate::domain::conversation::ChatMessage;
use crate::domain::document::VisionDocument;
use crate::domain::foundation::SectionKey;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

use super::prompts::{coaching_prompt, VISION_PERSONA_PROMPT};

/// Reply used when the coach gets no content back.
pub const COACH_FALLBACK_REPLY: &str = "Let's keep refining this.";

/// Reply used when the Vision persona gets no content back.
pub const VISION_FALLBACK_REPLY: &str = "<p>Let's refine that further.</p>";

/// Temperature for coaching replies.
pub const COACH_TEMPERATURE: f32 = 0.7;

pub struct ConversationCoach {
    ai_provider: Arc<dyn AIProvider>,
}

impl ConversationCoach {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Asks the model to help refine `section`.
    ///
    /// The instruction embeds the section's current draft and every other
    /// section as `KEY: value` lines, and leads the full transcript.
    pub async fn coach(
        &self,
        section: SectionKey,
        document: &VisionDocument,
        transcript: &[ChatMessage],
    ) -> Result<String, AIError> {
        let prompt = coaching_prompt(
            section,
            &document.draft_for(section),
            &document.context_excluding(section),
        );

        let request = CompletionRequest::new(RequestMetadata::new("coach"))
            .with_message(MessageRole::System, prompt)
            .with_transcript(transcript)
            .with_temperature(COACH_TEMPERATURE);

        let response = self.ai_provider.complete(request).await?;
        Ok(response
            .non_empty_content()
            .unwrap_or(COACH_FALLBACK_REPLY)
            .to_string())
    }

    /// Replies in the fixed Vision persona.
    pub async fn vision_reply(&self, transcript: &[ChatMessage]) -> Result<String, AIError> {
        let request = CompletionRequest::new(RequestMetadata::new("vision_chat"))
            .with_message(MessageRole::System, VISION_PERSONA_PROMPT)
            .with_transcript(transcript);

        let response = self.ai_provider.complete(request).await?;
        Ok(response
            .non_empty_content()
            .unwrap_or(VISION_FALLBACK_REPLY)
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::document::SectionValue;

    fn document() -> VisionDocument {
        let mut doc = VisionDocument::placeholder();
        doc.set(SectionKey::Vision, SectionValue::text("See far"));
        doc.set(SectionKey::Culture, SectionValue::text("Open by default"));
        doc
    }

    #[tokio::test]
    async fn prompt_embeds_draft_and_other_sections() {
        let provider = Arc::new(MockAIProvider::new().with_response("What does open mean?"));
        let coach = ConversationCoach::new(provider.clone());
        let transcript = vec![
            ChatMessage::assistant("Welcome!"),
            ChatMessage::user("Our culture should emphasize transparency"),
        ];

        let reply = coach
            .coach(SectionKey::Culture, &document(), &transcript)
            .await
            .unwrap();

        assert_eq!(reply, "What does open mean?");
        let call = provider.last_call().unwrap();
        assert_eq!(call.messages.len(), 3);
        assert_eq!(call.temperature, Some(0.7));

        let system = call.system_prompt().unwrap();
        assert!(system.contains("\"Open by default\""));
        assert!(system.contains("VISION: See far"));
        assert!(system.contains("MISSION: TBD"));
        assert!(!system.contains("CULTURE:"));
        assert_eq!(call.messages[2].content, "Our culture should emphasize transparency");
    }

    #[tokio::test]
    async fn unset_draft_is_described_as_missing() {
        let provider = Arc::new(MockAIProvider::new());
        ConversationCoach::new(provider.clone())
            .coach(SectionKey::Mission, &document(), &[])
            .await
            .unwrap();

        let call = provider.last_call().unwrap();
        assert!(call.system_prompt().unwrap().contains("\"No draft provided yet.\""));
    }

    #[tokio::test]
    async fn empty_reply_falls_back() {
        let provider = Arc::new(MockAIProvider::new().with_response("   "));
        let reply = ConversationCoach::new(provider)
            .coach(SectionKey::Values, &document(), &[])
            .await
            .unwrap();
        assert_eq!(reply, COACH_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn vision_reply_uses_persona_and_falls_back() {
        let provider = Arc::new(MockAIProvider::new().with_response(""));
        let coach = ConversationCoach::new(provider.clone());

        let reply = coach
            .vision_reply(&[ChatMessage::user("We want to be everywhere")])
            .await
            .unwrap();

        assert_eq!(reply, VISION_FALLBACK_REPLY);
        let call = provider.last_call().unwrap();
        assert_eq!(call.system_prompt(), Some(VISION_PERSONA_PROMPT));
        assert_eq!(call.messages.len(), 2);
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::Network {
            message: "reset".to_string(),
        }));
        let result = ConversationCoach::new(provider)
            .coach(SectionKey::Vision, &document(), &[])
            .await;
        assert!(matches!(result, Err(AIError::Network(_))));
    }
}
