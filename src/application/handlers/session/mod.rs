//! Session handlers - the client state controller's command surface.
//!
//! Handlers load a session, apply one step of its state machine, and save
//! it, holding the session's lock for each read-modify-write. Model calls
//! run outside the lock.

mod abandon;
mod chat_session;
mod crawl_session;
mod create_session;
mod delete_session;
mod edit_section;
mod errors;
mod evict_idle;
mod get_session;
mod locks;

pub use chat_session::{ChatSessionCommand, ChatSessionHandler, ChatSessionResult};
pub use crawl_session::{CrawlSessionCommand, CrawlSessionHandler, CrawlSessionResult};
pub use create_session::CreateSessionHandler;
pub use delete_session::DeleteSessionHandler;
pub use edit_section::{EditSectionCommand, EditSectionHandler};
pub use errors::SessionCommandError;
pub use evict_idle::{IdleSessionSweeper, IdleSweepConfig};
pub use get_session::GetSessionHandler;
pub use locks::SessionLocks;
