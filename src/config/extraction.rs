//! Website extraction configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::browser::WebDriverConfig;
use crate::adapters::extractor::{RenderedExtractorConfig, StaticExtractorConfig};
use crate::domain::extraction::{
    MIN_CONTENT_CHARS, MIN_FRAGMENT_CHARS, RENDERED_CHAR_LIMIT, STATIC_CHAR_LIMIT,
};

use super::error::ValidationError;

/// Settings for both extraction strategies and the headless browser.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Character cap for the static strategy
    #[serde(default = "default_static_char_limit")]
    pub static_char_limit: usize,

    /// Character cap for the rendered strategy
    #[serde(default = "default_rendered_char_limit")]
    pub rendered_char_limit: usize,

    /// Below this many characters the model is not called
    #[serde(default = "default_min_content_chars")]
    pub min_content_chars: usize,

    /// Rendered text fragments must be longer than this
    #[serde(default = "default_min_fragment_chars")]
    pub min_fragment_chars: usize,

    /// User agent for static fetches
    #[serde(default = "default_static_user_agent")]
    pub static_user_agent: String,

    /// User agent the headless browser presents
    #[serde(default = "default_browser_user_agent")]
    pub browser_user_agent: String,

    /// Static fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// WebDriver (chromedriver) endpoint
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Upper bound on a single WebDriver command in seconds
    #[serde(default = "default_webdriver_command_timeout")]
    pub webdriver_command_timeout_secs: u64,

    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_selector_timeout")]
    pub selector_timeout_secs: u64,

    #[serde(default = "default_scroll_pause")]
    pub scroll_pause_ms: u64,
}

impl ExtractionConfig {
    pub fn static_extractor_config(&self) -> StaticExtractorConfig {
        StaticExtractorConfig {
            user_agent: self.static_user_agent.clone(),
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            char_limit: self.static_char_limit,
        }
    }

    pub fn rendered_extractor_config(&self) -> RenderedExtractorConfig {
        RenderedExtractorConfig {
            navigation_timeout: Duration::from_secs(self.navigation_timeout_secs),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            selector_timeout: Duration::from_secs(self.selector_timeout_secs),
            scroll_pause: Duration::from_millis(self.scroll_pause_ms),
            char_limit: self.rendered_char_limit,
            min_fragment_chars: self.min_fragment_chars,
        }
    }

    pub fn webdriver_config(&self) -> WebDriverConfig {
        WebDriverConfig {
            endpoint: self.webdriver_url.trim_end_matches('/').to_string(),
            user_agent: self.browser_user_agent.clone(),
            command_timeout: Duration::from_secs(self.webdriver_command_timeout_secs),
        }
    }

    /// Validate extraction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.static_char_limit == 0 {
            return Err(ValidationError::ZeroCharLimit("static_char_limit"));
        }
        if self.rendered_char_limit == 0 {
            return Err(ValidationError::ZeroCharLimit("rendered_char_limit"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ValidationError::InvalidBrowserTiming("fetch_timeout_secs"));
        }
        if self.navigation_timeout_secs == 0 {
            return Err(ValidationError::InvalidBrowserTiming("navigation_timeout_secs"));
        }
        if self.selector_timeout_secs == 0 {
            return Err(ValidationError::InvalidBrowserTiming("selector_timeout_secs"));
        }
        if self.webdriver_command_timeout_secs < self.navigation_timeout_secs {
            return Err(ValidationError::InvalidBrowserTiming(
                "webdriver_command_timeout_secs",
            ));
        }
        match reqwest::Url::parse(&self.webdriver_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ValidationError::InvalidWebDriverUrl),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            static_char_limit: default_static_char_limit(),
            rendered_char_limit: default_rendered_char_limit(),
            min_content_chars: default_min_content_chars(),
            min_fragment_chars: default_min_fragment_chars(),
            static_user_agent: default_static_user_agent(),
            browser_user_agent: default_browser_user_agent(),
            fetch_timeout_secs: default_fetch_timeout(),
            webdriver_url: default_webdriver_url(),
            webdriver_command_timeout_secs: default_webdriver_command_timeout(),
            navigation_timeout_secs: default_navigation_timeout(),
            settle_delay_ms: default_settle_delay(),
            selector_timeout_secs: default_selector_timeout(),
            scroll_pause_ms: default_scroll_pause(),
        }
    }
}

fn default_static_char_limit() -> usize {
    STATIC_CHAR_LIMIT
}

fn default_rendered_char_limit() -> usize {
    RENDERED_CHAR_LIMIT
}

fn default_min_content_chars() -> usize {
    MIN_CONTENT_CHARS
}

fn default_min_fragment_chars() -> usize {
    MIN_FRAGMENT_CHARS
}

fn default_static_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_browser_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_fetch_timeout() -> u64 {
    15
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_webdriver_command_timeout() -> u64 {
    30
}

fn default_navigation_timeout() -> u64 {
    20
}

fn default_settle_delay() -> u64 {
    2_000
}

fn default_selector_timeout() -> u64 {
    5
}

fn default_scroll_pause() -> u64 {
    1_000
}
