//! Static extraction strategy: HTTP fetch plus markup parse.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::domain::extraction::bound_excerpt;
use crate::ports::TextExtractor;

static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='description']").expect("static selector"));

/// Element groups read in order after the meta description.
static TEXT_GROUPS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["h1", "h2", "h3", "p"]
        .iter()
        .map(|tag| Selector::parse(tag).expect("static selector"))
        .collect()
});

/// Settings for [`StaticExtractor`].
#[derive(Debug, Clone)]
pub struct StaticExtractorConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub char_limit: usize,
}

/// Fetches a page over HTTP and reads its description, headings, and paragraphs.
pub struct StaticExtractor {
    client: Client,
    char_limit: usize,
}

impl StaticExtractor {
    pub fn new(config: StaticExtractorConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            char_limit: config.char_limit,
        })
    }

    /// Returns the body whatever the status.
    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "Reading non-success page");
        }
        response.text().await
    }
}

/// Reduces an HTML document to the bounded excerpt.
///
/// Order: meta description, then all h1, h2, h3, and p text. Each group is
/// one fragment; fragments are separated by blank lines before whitespace
/// is collapsed.
pub fn excerpt_from_html(html: &str, char_limit: usize) -> String {
    let document = Html::parse_document(html);

    let description = document
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    let groups = TEXT_GROUPS.iter().map(|selector| {
        document
            .select(selector)
            .map(|el| el.text().collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join(" ")
    });

    bound_excerpt(std::iter::once(description).chain(groups), char_limit)
}

#[async_trait]
impl TextExtractor for StaticExtractor {
    async fn extract(&self, url: &str) -> String {
        match self.fetch(url).await {
            Ok(html) => {
                let text = excerpt_from_html(&html, self.char_limit);
                tracing::info!(url, chars = text.chars().count(), "Static extraction finished");
                text
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Static fetch failed");
                String::new()
            }
        }
    }

    fn strategy(&self) -> &'static str {
        "static"
    }
}
