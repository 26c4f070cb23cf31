//! Foundation module - Shared domain primitives.
//!
//! Contains the section vocabulary, identifiers, and validation errors
//! shared by every other domain module.

mod errors;
mod ids;
mod section_key;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use section_key::SectionKey;
