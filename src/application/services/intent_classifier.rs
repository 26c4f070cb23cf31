//! Intent Classifier - decides which section a chat message is about.

use std::sync::Arc;

use crate::domain::conversation::Classification;
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

use super::prompts::classifier_prompt;

pub struct IntentClassifier {
    ai_provider: Arc<dyn AIProvider>,
}

impl IntentClassifier {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// Classifies `message` into one of the seven sections.
    ///
    /// Any reply that is not exactly a section key (after trimming and
    /// lower-casing) is `Unrecognized`. Only provider failures are errors.
    pub async fn classify(&self, message: &str) -> Result<Classification, AIError> {
        let request = CompletionRequest::new(RequestMetadata::new("classify"))
            .with_message(MessageRole::System, classifier_prompt(message))
            .with_temperature(0.0);

        let response = self.ai_provider.complete(request).await?;
        let classification = Classification::from_label(&response.content);

        tracing::debug!(label = %response.content.trim(), ?classification, "Message classified");
        Ok(classification)
    }
}
