//! Document module - the Vision to Values draft and its section values.

mod section_value;
mod vision_document;

pub use section_value::{ItemEntry, SectionItem, SectionValue, PLACEHOLDER};
pub use vision_document::{sections_from_json, SectionMap, VisionDocument, NO_DRAFT_PROVIDED};
