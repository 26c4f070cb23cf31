//! Domain layer - Vision to Values drafting rules, free of I/O.

pub mod conversation;
pub mod document;
pub mod extraction;
pub mod foundation;
pub mod session;
pub mod synthesis;
