//! Newsreel CLI Library
//!
//! Configuration loading and command implementations for the `newsreel`
//! operator binary. Exposed as a library for testing purposes.

pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types for convenience
pub use config::CliConfig;
pub use error::{CliError, Result};
