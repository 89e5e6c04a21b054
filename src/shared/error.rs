//! Shared Error Types
//!
//! Errors that both the client and the backend can raise while handling
//! wire types, before any transport or HTTP status is involved.
//!
//! The backend turns a `ValidationError` into a 400 response.
use thiserror::Error;

/// Errors raised while handling shared wire types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// A field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The offending field, in its wire spelling
        field: String,
        message: String,
    },
}

impl SharedError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
