//! Text extractor adapters.
//!
//! - `StaticExtractor` - HTTP fetch + HTML parse
//! - `RenderedExtractor` - headless browser render

mod rendered_extractor;
mod static_extractor;

pub use rendered_extractor::{RenderedExtractor, RenderedExtractorConfig, CONTENT_SELECTOR};
pub use static_extractor::{excerpt_from_html, StaticExtractor, StaticExtractorConfig};
