//! Stateless drafting handlers behind the five drafting endpoints.

mod draft_from_website;
mod polish_document;
mod refine_section;
mod vision_chat;

pub use draft_from_website::{
    DraftError, DraftFromWebsiteCommand, DraftFromWebsiteHandler, DraftFromWebsiteResult,
};
pub use polish_document::PolishDocumentHandler;
pub use refine_section::{
    RefineOutcome, RefineSectionCommand, RefineSectionHandler, CLARIFICATION_REPLY,
    UNRECOGNIZED_SECTION_ERROR,
};
pub use vision_chat::VisionChatHandler;
