//! Headless Browser Port - Minimal browser automation surface.
//!
//! Covers what the rendered extraction strategy needs: open an isolated
//! page, navigate, wait for content, run scripts, and close.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// Errors from browser automation.
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("failed to start browser session: {0}")]
    SessionStart(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("script error: {0}")]
    Script(String),

    #[error("browser protocol error: {0}")]
    Protocol(String),
}

/// Port for launching isolated browser pages.
#[async_trait]
pub trait HeadlessBrowser: Send + Sync {
    /// Opens a fresh, isolated page. The caller must `close` it.
    async fn open(&self) -> Result<Box<dyn BrowserPage>, BrowserError>;
}

/// One isolated browser page.
#[async_trait]
pub trait BrowserPage: Send {
    /// Navigates to `url` and waits for the load event, bounded by `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Waits until an element matching the CSS `selector` exists.
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration)
        -> Result<(), BrowserError>;

    /// Runs a script in the page and returns its JSON result.
    async fn execute(&mut self, script: &str) -> Result<Value, BrowserError>;

    /// Releases the page and its browser session.
    async fn close(self: Box<Self>) -> Result<(), BrowserError>;
}
