//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through the ports.

pub mod drafting;
pub mod session;
