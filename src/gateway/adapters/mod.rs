//! Adapter implementations of the model gateway port.

pub mod chat_completions;
pub mod scripted;

pub use chat_completions::ChatCompletionsGateway;
pub use scripted::{RecordedExchange, ScriptedModelGateway};
