//! Nameserver client initialization.
//!
//! This module builds the resolver client used by every query of a resolution,
//! bound to the configured nameserver and per-query timeout.

use std::sync::Arc;

use crate::config::Config;
use crate::dns::NameserverClient;

/// Initializes the resolver client for CAA, CNAME, DNAME and SOA questions.
///
/// The client talks to exactly one nameserver on port 53 with no fallback list.
/// Each question is bounded by `config.timeout_seconds`; the engine has no
/// cancellation of its own, so an unbounded query would hang the resolution.
pub fn init_resolver(config: &Config) -> Arc<NameserverClient> {
    Arc::new(NameserverClient::new(
        config.nameserver_addr(),
        config.query_timeout(),
    ))
}
