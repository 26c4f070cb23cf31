//! Extraction module - pure text and URL rules for website extraction.
//!
//! Fetching and rendering live behind the `TextExtractor` port; this module
//! only holds the shaping rules both strategies share.

mod text;
mod url;

pub use text::{bound_excerpt, collapse_whitespace, has_sufficient_signal, truncate_chars};
pub use url::{is_crawlable_url, normalize_url};

/// Character budget for the static (fetch + parse) strategy.
pub const STATIC_CHAR_LIMIT: usize = 6_000;

/// Character budget for the rendered (headless browser) strategy.
pub const RENDERED_CHAR_LIMIT: usize = 8_000;

/// Minimum extracted length worth sending to the model.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Rendered fragments must be longer than this to be kept.
pub const MIN_FRAGMENT_CHARS: usize = 20;
