//! Error types for response extraction.

use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Errors returned while recovering a payload from a model reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The payload is not a JSON object.
    #[error("malformed model response: {reason}")]
    MalformedResponse {
        /// Parser diagnostic.
        reason: String,
    },

    /// A required field is absent, null, or empty.
    #[error("incomplete model response: missing required field '{field}'")]
    IncompleteResponse {
        /// Name of the first missing field.
        field: String,
    },
}

impl ExtractionError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}
