//! Website URL normalization and the crawl shape check.

use once_cell::sync::Lazy;
use regex::Regex;

static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").expect("static regex"));

static CRAWLABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+\..+").expect("static regex"));

/// Trims the input and prefixes `https://` when no http(s) scheme is present.
///
/// Empty input stays empty.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Returns true if the URL has the `http(s)://host.tld` shape required for a crawl.
pub fn is_crawlable_url(url: &str) -> bool {
    CRAWLABLE.is_match(url)
}
