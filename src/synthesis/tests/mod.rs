//! Unit tests for code synthesis.
