//! Model gateway: one chat exchange with a language-model provider.
//!
//! The gateway returns the provider's reply text verbatim. Payload recovery
//! belongs to [`crate::extraction`], which keeps adapters provider-agnostic.
//!
//! - Port contract in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod ports;

#[cfg(test)]
mod tests;
