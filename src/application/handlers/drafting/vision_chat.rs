//! VisionChatHandler - single-persona chat focused on the Vision section.

use std::sync::Arc;

use crate::application::services::ConversationCoach;
use crate::domain::conversation::ChatMessage;
use crate::ports::{AIError, AIProvider};

pub struct VisionChatHandler {
    coach: ConversationCoach,
}

impl VisionChatHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            coach: ConversationCoach::new(ai_provider),
        }
    }

    pub async fn handle(&self, messages: &[ChatMessage]) -> Result<String, AIError> {
        self.coach.vision_reply(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;

    #[tokio::test]
    async fn returns_model_reply() {
        let provider = Arc::new(MockAIProvider::new().with_response("<p>Tell me more.</p>"));
        let reply = VisionChatHandler::new(provider)
            .handle(&[ChatMessage::user("We help cities breathe")])
            .await
            .unwrap();
        assert_eq!(reply, "<p>Tell me more.</p>");
    }
}
