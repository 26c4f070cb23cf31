//! Conversation module - chat history, classification, routing, and
//! completion detection for the refinement chat.

mod classification;
mod completion;
mod message;
mod routing;
mod transcript;

pub use classification::Classification;
pub use completion::{signals_completion, COMPLETION_PHRASES};
pub use message::{latest_user_message, ChatMessage, ChatRole};
pub use routing::ActiveSection;
pub use transcript::{Transcript, WELCOME_MESSAGE};
