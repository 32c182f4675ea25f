//! Port contracts for language-model access.

pub mod model;

pub use model::{ChatOptions, ModelGateway, ModelGatewayError, ModelGatewayResult};

#[cfg(test)]
pub use model::MockModelGateway;
