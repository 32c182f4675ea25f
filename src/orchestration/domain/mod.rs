//! Domain model for ability orchestration.
//!
//! The ability catalog is static configuration. Records keep the ability
//! tags the model emitted verbatim; catalog membership is checked where the
//! abilities are used.

mod ability;
mod error;
mod prompt;
mod record;

pub use ability::{Ability, AbilityTier};
pub use error::{ParseAbilityError, ParseAppKindError, ParseFieldTypeError, PromptError};
pub use prompt::{MAX_PROMPT_CHARS, Prompt};
pub use record::{AppKind, FieldSpec, FieldType, OrchestrationRecord};
