//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, ports, buffer sizes)
//! - Library configuration and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{AliasRecordSource, Cli, Config, ConfigValidationError, LogFormat, LogLevel};
