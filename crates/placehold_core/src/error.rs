//! Error types for placeholder resolution.

use thiserror::Error;

/// Result type alias for placeholder operations.
pub type PlaceholderResult<T> = Result<T, PlaceholderError>;

/// Errors that can occur while parsing or resolving placeholders.
#[derive(Error, Debug)]
pub enum PlaceholderError {
    #[error("invalid metadata in placeholder '{placeholder}': {source}")]
    Metadata {
        placeholder: String,
        source: LiteralError,
    },
}

/// Failure raised by the relaxed literal parser.
///
/// `offset` is the byte position in the fragment where parsing stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct LiteralError {
    pub message: String,
    pub offset: usize,
}

impl LiteralError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}
