//! Application layer - handlers and model-backed services.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
pub mod services;
