//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::ai::OpenAIConfig;

use super::error::ValidationError;

/// OpenAI chat-completions configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Ask for `response_format: json_object` on synthesis requests
    #[serde(default)]
    pub json_response_format: bool,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Builds the adapter configuration.
    pub fn openai_config(&self) -> Result<OpenAIConfig, ValidationError> {
        let api_key = self
            .openai_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;

        Ok(OpenAIConfig::new(api_key)
            .with_model(self.model.clone())
            .with_base_url(self.base_url.trim_end_matches('/'))
            .with_timeout(self.timeout())
            .with_json_response_format(self.json_response_format))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            json_response_format: false,
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}
