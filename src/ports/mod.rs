//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - chat-completion model
//! - `TextExtractor` - website to plain-text excerpt
//! - `HeadlessBrowser` / `BrowserPage` - browser automation for rendered pages
//! - `SessionStore` - drafting session storage

mod ai_provider;
mod headless_browser;
mod session_store;
mod text_extractor;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use headless_browser::{BrowserError, BrowserPage, HeadlessBrowser};
pub use session_store::{SessionStore, SessionStoreError};
pub use text_extractor::TextExtractor;
