//! Error types for orchestration domain validation and parsing.

use thiserror::Error;

/// Errors returned while validating a user prompt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromptError {
    /// The prompt is empty or whitespace only.
    #[error("prompt must not be empty")]
    Empty,

    /// The prompt exceeds the character limit.
    #[error("prompt must be between 1 and {max} characters, got {length}")]
    TooLong {
        /// Length in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },
}

/// Error returned while parsing an ability tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown ability: {0}")]
pub struct ParseAbilityError(pub String);

/// Error returned while parsing an application kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application kind: {0}")]
pub struct ParseAppKindError(pub String);

/// Error returned while parsing a field type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown field type: {0}")]
pub struct ParseFieldTypeError(pub String);
