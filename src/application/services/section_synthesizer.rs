//! Section Synthesizer - turns source text into a raw model reply that
//! should contain the seven sections as JSON.

use std::sync::Arc;

use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Temperature for synthesis requests.
pub const SYNTHESIS_TEMPERATURE: f32 = 0.7;

/// Sends source text with a synthesis instruction to the model.
pub struct SectionSynthesizer {
    ai_provider: Arc<dyn AIProvider>,
}

impl SectionSynthesizer {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Returns the raw reply, or `""` if the provider returned no content.
    pub async fn synthesize(&self, source_text: &str, instruction: &str) -> Result<String, AIError> {
        let mut request = CompletionRequest::new(RequestMetadata::new("synthesize"))
            .with_message(MessageRole::System, instruction)
            .with_message(MessageRole::User, source_text)
            .with_temperature(SYNTHESIS_TEMPERATURE);

        if self.ai_provider.provider_info().supports_json_object {
            request = request.with_json_object();
        }

        let response = self.ai_provider.complete(request).await?;
        tracing::debug!(
            chars = response.content.chars().count(),
            "Synthesis reply received"
        );
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::ProviderInfo;

    #[tokio::test]
    async fn sends_instruction_then_source_text() {
        let provider = Arc::new(MockAIProvider::new().with_response("{\"vision\":\"x\"}"));
        let synthesizer = SectionSynthesizer::new(provider.clone());

        let reply = synthesizer.synthesize("site text", "instruction").await.unwrap();

        assert_eq!(reply, "{\"vision\":\"x\"}");
        let call = provider.last_call().unwrap();
        assert_eq!(call.messages[0].role, MessageRole::System);
        assert_eq!(call.messages[0].content, "instruction");
        assert_eq!(call.messages[1].role, MessageRole::User);
        assert_eq!(call.messages[1].content, "site text");
        assert_eq!(call.temperature, Some(0.7));
        assert!(!call.json_object);
    }

    #[tokio::test]
    async fn asks_for_json_when_supported() {
        let provider = Arc::new(
            MockAIProvider::new()
                .with_provider_info(ProviderInfo::new("mock", "m").with_json_object(true)),
        );
        SectionSynthesizer::new(provider.clone())
            .synthesize("text", "instruction")
            .await
            .unwrap();

        assert!(provider.last_call().unwrap().json_object);
    }

    #[tokio::test]
    async fn empty_content_is_passed_through() {
        let provider = Arc::new(MockAIProvider::new().with_response(""));
        let reply = SectionSynthesizer::new(provider)
            .synthesize("text", "instruction")
            .await
            .unwrap();
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let provider = Arc::new(MockAIProvider::new().with_error(MockError::AuthenticationFailed));
        let result = SectionSynthesizer::new(provider).synthesize("t", "i").await;
        assert!(matches!(result, Err(AIError::AuthenticationFailed)));
    }
}
