//! Rendered extraction strategy: drive a headless browser so client-side
//! rendered pages produce their text.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::extraction::bound_excerpt;
use crate::ports::{BrowserError, BrowserPage, HeadlessBrowser, TextExtractor};

/// Elements whose presence means the page has rendered something.
pub const CONTENT_SELECTOR: &str = "h1, p, main, body";

const SCROLL_SCRIPT: &str = "window.scrollBy(0, window.innerHeight); return null;";

/// Returns the trimmed text of visible h1, h2, h3, p, and li elements.
const VISIBLE_TEXT_SCRIPT: &str = r#"
const isVisible = (el) => {
  const style = window.getComputedStyle(el);
  return style.display !== "none" && style.visibility !== "hidden" && style.opacity !== "0";
};
return Array.from(document.querySelectorAll("h1, h2, h3, p, li"))
  .filter(isVisible)
  .map((el) => (el.textContent || "").trim());
"#;

/// Timing and size settings for [`RenderedExtractor`].
#[derive(Debug, Clone)]
pub struct RenderedExtractorConfig {
    pub navigation_timeout: Duration,
    pub settle_delay: Duration,
    pub selector_timeout: Duration,
    pub scroll_pause: Duration,
    pub char_limit: usize,
    pub min_fragment_chars: usize,
}

/// Extracts visible text through a [`HeadlessBrowser`].
pub struct RenderedExtractor {
    browser: Arc<dyn HeadlessBrowser>,
    config: RenderedExtractorConfig,
}

impl RenderedExtractor {
    pub fn new(browser: Arc<dyn HeadlessBrowser>, config: RenderedExtractorConfig) -> Self {
        Self { browser, config }
    }

    async fn read_page(
        &self,
        page: &mut dyn BrowserPage,
        url: &str,
    ) -> Result<Vec<String>, BrowserError> {
        page.navigate(url, self.config.navigation_timeout).await?;
        tokio::time::sleep(self.config.settle_delay).await;
        page.wait_for_selector(CONTENT_SELECTOR, self.config.selector_timeout)
            .await?;

        page.execute(SCROLL_SCRIPT).await?;
        tokio::time::sleep(self.config.scroll_pause).await;

        let result = page.execute(VISIBLE_TEXT_SCRIPT).await?;
        fragments_from_script(result)
    }

    fn keep_fragments(&self, fragments: Vec<String>) -> Vec<String> {
        fragments
            .into_iter()
            .filter(|text| text.chars().count() > self.config.min_fragment_chars)
            .collect()
    }
}

/// Reads the visible-text script's array result.
fn fragments_from_script(value: Value) -> Result<Vec<String>, BrowserError> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(BrowserError::Script(format!(
            "expected an array of strings, got {}",
            other
        ))),
    }
}

/// Owns an open page and closes it on every exit path.
///
/// Dropping the guard without calling [`PageGuard::close`], as happens when
/// the extraction future is cancelled, closes the page on a spawned task.
struct PageGuard {
    page: Option<Box<dyn BrowserPage>>,
}

impl PageGuard {
    fn new(page: Box<dyn BrowserPage>) -> Self {
        Self { page: Some(page) }
    }

    fn page(&mut self) -> Result<&mut dyn BrowserPage, BrowserError> {
        match self.page.as_deref_mut() {
            Some(page) => Ok(page),
            None => Err(BrowserError::Protocol("page already closed".to_string())),
        }
    }

    async fn close(mut self) -> Result<(), BrowserError> {
        match self.page.take() {
            Some(page) => page.close().await,
            None => Ok(()),
        }
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        let Some(page) = self.page.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    match page.close().await {
                        Ok(()) => tracing::debug!("Closed abandoned browser session"),
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to close abandoned browser session")
                        }
                    }
                });
            }
            Err(_) => tracing::warn!("No runtime to close abandoned browser session"),
        }
    }
}

#[async_trait]
impl TextExtractor for RenderedExtractor {
    async fn extract(&self, url: &str) -> String {
        let mut guard = match self.browser.open().await {
            Ok(page) => PageGuard::new(page),
            Err(e) => {
                tracing::warn!(url, error = %e, "Could not open browser session");
                return String::new();
            }
        };

        let outcome = match guard.page() {
            Ok(page) => self.read_page(page, url).await,
            Err(e) => Err(e),
        };

        if let Err(e) = guard.close().await {
            tracing::warn!(url, error = %e, "Failed to close browser session");
        }

        match outcome {
            Ok(fragments) => {
                let kept = self.keep_fragments(fragments);
                let text = bound_excerpt(kept, self.config.char_limit);
                tracing::info!(url, chars = text.chars().count(), "Rendered extraction finished");
                text
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Rendered extraction failed");
                String::new()
            }
        }
    }

    fn strategy(&self) -> &'static str {
        "rendered"
    }
}
