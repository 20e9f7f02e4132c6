//! Shared utilities: error types and logging setup.

pub mod errors;
pub mod logger;
