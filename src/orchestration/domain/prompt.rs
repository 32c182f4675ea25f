//! Validated user prompt.

use super::PromptError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum prompt length in characters.
pub const MAX_PROMPT_CHARS: usize = 500;

/// User prompt of 1 to [`MAX_PROMPT_CHARS`] characters.
///
/// Length counts Unicode scalar values, so a CJK prompt gets the same budget
/// as an ASCII one. Whitespace-only input counts as empty even though its
/// raw length is non-zero; such a prompt never reaches the model. The text
/// is kept as given, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prompt(String);

impl Prompt {
    /// Creates a validated prompt.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Empty`] for empty or whitespace-only input and
    /// [`PromptError::TooLong`] above [`MAX_PROMPT_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, PromptError> {
        let text = value.into();
        if text.trim().is_empty() {
            return Err(PromptError::Empty);
        }
        let length = text.chars().count();
        if length > MAX_PROMPT_CHARS {
            return Err(PromptError::TooLong {
                length,
                max: MAX_PROMPT_CHARS,
            });
        }
        Ok(Self(text))
    }

    /// Returns the prompt text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Prompt {
    type Error = PromptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Prompt> for String {
    fn from(value: Prompt) -> Self {
        value.0
    }
}
