// Shared test helpers for scripted zones and record data.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use caa_check::dns::ScriptedExchange;
use tldextract::{TldExtractor, TldOption};
use trust_dns_resolver::proto::rr::rdata::{CAA, CNAME, SOA};
use trust_dns_resolver::proto::rr::{Name, RData, RecordType};

/// Public Suffix List extractor using the bundled snapshot.
#[allow(dead_code)] // Used by other test files
pub fn extractor() -> TldExtractor {
    TldExtractor::new(TldOption::default())
}

/// Parses a name, panicking on invalid test input.
pub fn name(s: &str) -> Name {
    Name::from_ascii(s).expect("valid test name")
}

/// CAA `issue` rdata for `issuer`.
#[allow(dead_code)]
pub fn issue(issuer: &str) -> RData {
    RData::CAA(CAA::new_issue(false, Some(name(issuer)), vec![]))
}

/// CAA `issuewild` rdata for `issuer`.
#[allow(dead_code)]
pub fn issuewild(issuer: &str) -> RData {
    RData::CAA(CAA::new_issuewild(false, Some(name(issuer)), vec![]))
}

/// CNAME rdata pointing at `target`.
#[allow(dead_code)]
pub fn cname(target: &str) -> RData {
    RData::CNAME(CNAME(name(target)))
}

/// Scripted exchange that knows the SOA of `domain`.
///
/// `signed` sets the AD flag on every unscripted reply and on the SOA reply.
#[allow(dead_code)]
pub fn scripted_zone(domain: &str, signed: bool) -> ScriptedExchange {
    let soa = RData::SOA(SOA::new(
        name(&format!("ns1.{domain}.")),
        name(&format!("hostmaster.{domain}.")),
        2024060101,
        3600,
        900,
        604800,
        300,
    ));
    ScriptedExchange::new(signed).answer(domain, RecordType::SOA, vec![soa])
}
