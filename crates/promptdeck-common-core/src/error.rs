//! Error types for PromptDeck.

use thiserror::Error;

/// The main error type for PromptDeck operations.
///
/// None of these are fatal to the process. Validation errors block the
/// operation that raised them; missing ids and clipboard failures are
/// absorbed by the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// A required input was missing or malformed.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// An id did not match any known item.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Writing to the clipboard failed.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a clipboard error.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    /// Whether this error should block the operation that raised it.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::NotFound { .. } | Self::Clipboard(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using PromptDeck's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = Error::validation("name", "must not be empty");
        assert_eq!(err.to_string(), "invalid name: must not be empty");
        assert!(err.is_blocking());
    }

    #[test]
    fn test_absorbed_errors_are_not_blocking() {
        assert!(!Error::not_found("history entry", "prompt_x").is_blocking());
        assert!(!Error::clipboard("no display").is_blocking());
        assert!(Error::config("bad").is_blocking());
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("template", "polaroid");
        assert_eq!(err.to_string(), "template not found: polaroid");
    }
}
