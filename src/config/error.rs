//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI provider timeout")]
    InvalidAiTimeout,

    #[error("Invalid AI base URL")]
    InvalidAiBaseUrl,

    #[error("Invalid WebDriver URL")]
    InvalidWebDriverUrl,

    #[error("Character limit must be greater than zero: {0}")]
    ZeroCharLimit(&'static str),

    #[error("Invalid browser timing: {0}")]
    InvalidBrowserTiming(&'static str),

    #[error("Invalid session retention setting: {0}")]
    InvalidSessionRetention(&'static str),
}
