//! Error handling.
//!
//! Errors are split into:
//! - **Fatal**: classification, encoding and authority failures that end a resolution
//! - **Recoverable**: per-query transport and response-code failures, recorded as controls

mod types;

// Re-export public API
pub use types::{InitializationError, ResolutionError};
