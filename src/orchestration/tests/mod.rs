//! Unit tests for the orchestration context.
