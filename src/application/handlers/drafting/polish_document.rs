//! PolishDocumentHandler - produce the polished HTML page.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::services::DocumentPolisher;
use crate::domain::document::sections_from_json;
use crate::ports::{AIError, AIProvider};

pub struct PolishDocumentHandler {
    polisher: DocumentPolisher,
}

impl PolishDocumentHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            polisher: DocumentPolisher::new(ai_provider),
        }
    }

    /// Polishes the sections in a `{sectionKey: value}` object.
    ///
    /// Unknown keys are ignored; missing or blank sections are left out of
    /// the prompt.
    pub async fn handle(&self, sections: &Map<String, Value>) -> Result<String, AIError> {
        self.polisher.polish(&sections_from_json(sections)).await
    }
}
