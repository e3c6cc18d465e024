//! Configuration constants.
//!
//! This module defines the operational parameters of the resolver client:
//! nameserver port, query timeout and EDNS buffer sizes.

// Network operation timeouts
/// DNS query timeout in seconds
/// A single outstanding query blocks the whole walk, so a hung nameserver must fail
/// within a few seconds (typical stub resolver default)
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Nameserver port. Queries go to a single fixed `<address>:53` endpoint.
pub const DNS_PORT: u16 = 53;

// Message size limits
/// Advertised EDNS0 UDP payload size in bytes
pub const EDNS_UDP_PAYLOAD: u16 = 4096;
/// Receive buffer size for UDP replies
/// Must hold anything a server may send for the advertised payload size
pub const MAX_UDP_RESPONSE: usize = 4096;

/// Advisory recorded when the registrable domain's zone answers with the AD bit set.
pub const DNSSEC_FOUND_MESSAGE: &str = "DNSSEC found on domain, no DNS errors may occur.";
