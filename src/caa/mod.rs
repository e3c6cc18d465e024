//! CAA policy resolution.
//!
//! This module ties the DNS fetchers and the domain helpers together:
//! - `engine` - Hierarchy walk and acceptance
//! - `policy` - DNSSEC checks and the response-code table
//! - `report` - Report model and its aggregation rules

mod engine;
mod policy;
mod report;

pub use engine::CaaEngine;
pub use policy::{
    assess_reply, lookup_failure, rcode_control, Finding, RcodeRule, Severity, RCODE_RULES,
    UNKNOWN_RCODE,
};
pub use report::{Control, HostResult, Outcome, Report};
