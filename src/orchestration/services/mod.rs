//! Orchestration service, model instructions, and keyword rules.

mod keywords;
mod orchestrator;
mod prompts;

pub use keywords::{KEYWORD_RULES, KeywordRule, enforce_mandatory_abilities, mandatory_abilities};
pub use orchestrator::{AbilityOrchestrator, OrchestrationError, OrchestrationResult};
pub use prompts::{ORCHESTRATION_OPTIONS, system_prompt, user_message};
