//! Text Extractor Port - Reduces a web page to a bounded plain-text excerpt.
//!
//! Two strategies implement this port: a static fetch-and-parse and a
//! headless-browser render. Callers treat them interchangeably.

use async_trait::async_trait;

/// Port for website text extraction.
///
/// Extraction never fails from the caller's point of view: any fetch,
/// parse, or browser failure is logged by the implementation and reported
/// as an empty excerpt.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns collapsed, trimmed, length-bounded text for `url`.
    async fn extract(&self, url: &str) -> String;

    /// Short strategy name for logs ("static", "rendered").
    fn strategy(&self) -> &'static str;
}
