//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - OpenAI chat completions and a scriptable mock
//! - `browser` - headless Chrome over WebDriver
//! - `extractor` - static and rendered website text extraction
//! - `storage` - session storage
//! - `http` - the axum REST API

pub mod ai;
pub mod browser;
pub mod extractor;
pub mod http;
pub mod storage;
