//! Error type definitions.
//!
//! This module defines the resolution error taxonomy and initialization failures.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while resolving a CAA policy.
///
/// The first three variants are fatal and end the resolution. `TransportError` and
/// `LookupError` are per-query failures that the engine downgrades to controls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)] // Variant names follow the error taxonomy
pub enum ResolutionError {
    /// No registrable domain can be derived from the hostname.
    #[error("{0}")]
    DomainClassificationError(String),

    /// The name cannot be converted to its ASCII-compatible form.
    #[error("cannot convert {name} to ASCII: {reason}")]
    EncodingError {
        /// Name that failed conversion
        name: String,
        /// Conversion failure
        reason: String,
    },

    /// The registrable domain's authority could not be confirmed.
    #[error("{0}")]
    DomainNotFoundError(String),

    /// No usable reply was received for a query.
    #[error("{name}: {reason}")]
    TransportError {
        /// Name that was queried
        name: String,
        /// Why no reply was received
        reason: String,
    },

    /// A reply was received with a non-success response code.
    #[error("{name}: response code {code}")]
    LookupError {
        /// Name that was queried
        name: String,
        /// Numeric response code
        code: u16,
        /// Authenticated-data flag of the reply
        authenticated: bool,
    },
}

impl ResolutionError {
    /// Returns `true` for errors that end the resolution.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DomainClassificationError(_)
                | Self::EncodingError { .. }
                | Self::DomainNotFoundError(_)
        )
    }

    pub(crate) fn transport(name: &str, reason: impl ToString) -> Self {
        Self::TransportError {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
