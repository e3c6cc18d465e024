//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - Public Suffix List extractor
//! - Nameserver client

mod logger;
mod resolver;

use std::sync::Arc;

use tldextract::{TldExtractor, TldOption};

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes the Public Suffix List extractor.
///
/// Uses the ICANN snapshot bundled with `tldextract`; no network access is needed.
/// Private-section suffixes are matched separately by the `domain` module.
pub fn init_extractor() -> Arc<TldExtractor> {
    Arc::new(TldExtractor::new(TldOption::default()))
}
