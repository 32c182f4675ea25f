//! Ability orchestration: from a free-text prompt to an ordered ability list.
//!
//! The orchestrator does not pick an application template. It asks the
//! model which catalog abilities the user needs and in what order, then
//! guarantees that abilities named explicitly in the prompt are present.
//!
//! - Domain types in [`domain`]
//! - Orchestration service in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
