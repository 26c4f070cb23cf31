//! Session errors.

use thiserror::Error;

use super::ticket::RequestKind;

/// Errors raised by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a website crawl is already in progress")]
    CrawlInFlight,

    #[error("{0:?} response is stale and was dropped")]
    StaleResponse(RequestKind),

    #[error("message cannot be empty")]
    EmptyMessage,
}
