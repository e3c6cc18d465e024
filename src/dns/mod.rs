//! DNS questions and record extraction.
//!
//! This module provides:
//! - The `Exchange` seam and its UDP implementation (`NameserverClient`)
//! - Reply decoding that reads CAA rdata raw
//! - Record fetchers for CAA, CNAME and DNAME
//! - The SOA authority lookup for the registrable domain
//! - A scripted exchange for offline walks (`test-util` feature)
//!
//! Questions are issued one at a time; nothing here caches or retries.

mod authority;
mod client;
mod records;
mod reply;
#[cfg(any(test, feature = "test-util"))]
mod scripted;

// Re-export public API
pub use authority::{lookup_authority, Authority};
pub use client::{build_query, Exchange, NameserverClient};
pub use records::{
    decode_dname_target, fetch_caa, fetch_cname, fetch_dname, CaaAnswer, CaaRecord, DNAME,
};
pub use reply::{Answer, Reply};
#[cfg(any(test, feature = "test-util"))]
pub use scripted::{raw_caa, response, ScriptedExchange};
