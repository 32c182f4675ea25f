//! Unit tests for the deployment context.
