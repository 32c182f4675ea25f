//! Code synthesis: from an orchestration record to application source.
//!
//! Two strategies share one template set. [`SynthesisStrategy::Template`]
//! renders the template for the record's kind. With
//! [`SynthesisStrategy::ModelAssisted`] the rendered template is sent to the
//! model together with the record, and the fenced source in the reply is
//! returned. Neither strategy compiles or lints its output.

mod error;
mod render;
mod strategy;
mod synthesizer;

pub use error::{SynthesisError, SynthesisResult};
pub use render::{render, template_name};
pub use strategy::{ParseSynthesisStrategyError, SynthesisOptions, SynthesisStrategy};
pub use synthesizer::{CodeSynthesizer, SYNTHESIS_OPTIONS, resolve_kind};

#[cfg(test)]
mod tests;
