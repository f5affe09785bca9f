//! Shared test infrastructure for integration tests

pub mod harness;
