//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Unknown section '{0}'")]
    UnknownSection(String),
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown section error.
    pub fn unknown_section(key: impl Into<String>) -> Self {
        ValidationError::UnknownSection(key.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            ValidationError::empty_field("url").to_string(),
            "Field 'url' cannot be empty"
        );
        assert_eq!(
            ValidationError::invalid_format("url", "missing host").to_string(),
            "Field 'url' has invalid format: missing host"
        );
        assert_eq!(
            ValidationError::unknown_section("goals").to_string(),
            "Unknown section 'goals'"
        );
    }
}
