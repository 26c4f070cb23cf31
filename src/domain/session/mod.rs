//! Session module - client state for one drafting session.
//!
//! ## Policies
//!
//! - **Partial merge**: crawl results only fill sections that are empty or `"TBD"`
//! - **Auto-navigation**: the active section follows the classifier after each chat turn
//! - **Completion commit**: a reply containing a completion phrase becomes the section text
//! - **Stale responses**: a settled request older than the latest of its kind is dropped

mod errors;
mod form_session;
mod progress;
mod ticket;

pub use errors::SessionError;
pub use form_session::{ChatOutcome, ChatTurn, FormSession, CHAT_FAILURE_REPLY, REFRESH_NOTICE};
pub use progress::{
    CrawlProgress, PROGRESS_CAP, PROGRESS_RESET_DELAY, PROGRESS_STEP, PROGRESS_TICK,
};
pub use ticket::{RequestKind, RequestSequencer, RequestTicket};
