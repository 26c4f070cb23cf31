//! Model-backed services.
//!
//! Each service wraps the `AIProvider` port for one task and owns that
//! task's prompt, temperature, and empty-reply fallback.

pub mod prompts;

mod conversation_coach;
mod document_polisher;
mod intent_classifier;
mod section_synthesizer;

pub use conversation_coach::{
    ConversationCoach, COACH_FALLBACK_REPLY, COACH_TEMPERATURE, VISION_FALLBACK_REPLY,
};
pub use document_polisher::{polish_summary, DocumentPolisher, POLISH_FALLBACK_CONTENT};
pub use intent_classifier::IntentClassifier;
pub use section_synthesizer::{SectionSynthesizer, SYNTHESIS_TEMPERATURE};
