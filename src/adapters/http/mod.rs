//! HTTP adapters - REST API implementations.
//!
//! `drafting` serves the stateless endpoints where the client owns the
//! document; `session` serves the server-held session API.

pub mod drafting;
pub mod error;
pub mod session;

mod router;

pub use drafting::{drafting_routes, DraftingHandlers};
pub use error::{ApiError, ApiJson, ErrorResponse};
pub use router::app_router;
pub use session::{session_routes, SessionHandlers};
