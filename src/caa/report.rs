//! Resolution report and its aggregation rules.
//!
//! The report is the accumulator threaded through one resolution. Its
//! invariants are enforced here: `blocking` is never cleared once raised and
//! `found` is set at most once, together with the issuer lists.

use serde::Serialize;

use super::policy::{Finding, Severity};
use crate::dns::CaaRecord;
use crate::error_handling::ResolutionError;

/// Result of one CAA lookup during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResult {
    /// Name that was queried
    pub hostname: String,
    /// CAA records found (possibly none)
    #[serde(rename = "caarecords", skip_serializing_if = "Vec::is_empty")]
    pub caa_records: Vec<CaaRecord>,
    /// Authenticated-data flag of this query's reply
    #[serde(skip_serializing_if = "is_false")]
    pub authenticated_data: bool,
    /// Response code of this query's reply (0 when no reply arrived)
    #[serde(rename = "responsecode")]
    pub response_code: u16,
    /// CNAME target discovered at this name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    /// DNAME target discovered at this name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dname: Option<String>,
}

impl HostResult {
    /// Empty result for `hostname`.
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            caa_records: Vec::new(),
            authenticated_data: false,
            response_code: 0,
            cname: None,
            dname: None,
        }
    }
}

/// An advisory or warning recorded during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    /// Human-readable message
    pub message: String,
    /// Whether a CA should withhold issuance
    #[serde(skip_serializing_if = "is_false")]
    pub blocking: bool,
}

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A non-empty CAA set was accepted
    Accepted,
    /// The walk completed without accepting a CAA set
    Exhausted,
    /// A fatal error stopped the resolution
    FatalError,
}

/// Policy report for one hostname.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    domain: String,
    dnssec: bool,
    #[serde(skip_serializing_if = "is_false")]
    blocking: bool,
    #[serde(skip_serializing_if = "is_false")]
    found: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issue: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issuewild: Vec<String>,
    #[serde(rename = "host", skip_serializing_if = "Vec::is_empty")]
    hosts: Vec<HostResult>,
    #[serde(rename = "control", skip_serializing_if = "Vec::is_empty")]
    controls: Vec<Control>,
    #[serde(skip_serializing_if = "is_false")]
    error: bool,
    #[serde(rename = "errormessage", skip_serializing_if = "String::is_empty")]
    error_message: String,
}

impl Report {
    /// Starts a report for the normalized input hostname.
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            ..Default::default()
        }
    }

    /// Normalized input hostname.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// DNSSEC status of the registrable domain's zone.
    pub fn dnssec(&self) -> bool {
        self.dnssec
    }

    /// True once any escalating blocking control was recorded.
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// True once a conclusive CAA set was accepted.
    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Accepted `issue` values.
    pub fn issue(&self) -> &[String] {
        &self.issue
    }

    /// Accepted `issuewild` values.
    pub fn issuewild(&self) -> &[String] {
        &self.issuewild
    }

    /// Per-name results in walk order.
    pub fn hosts(&self) -> &[HostResult] {
        &self.hosts
    }

    /// Controls in discovery order.
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Message of the fatal error, if the resolution was cut short.
    pub fn error_message(&self) -> Option<&str> {
        self.error.then_some(self.error_message.as_str())
    }

    /// How the resolution ended.
    pub fn outcome(&self) -> Outcome {
        if self.error {
            Outcome::FatalError
        } else if self.found {
            Outcome::Accepted
        } else {
            Outcome::Exhausted
        }
    }

    pub(crate) fn set_dnssec(&mut self, dnssec: bool) {
        self.dnssec = dnssec;
    }

    /// Appends a control; escalating severities raise `blocking` for good.
    pub fn add_control(&mut self, message: impl Into<String>, severity: Severity) {
        self.controls.push(Control {
            message: message.into(),
            blocking: severity.is_blocking(),
        });
        if severity.escalates() {
            self.blocking = true;
        }
    }

    pub(crate) fn add_finding(&mut self, finding: Finding) {
        self.add_control(finding.message, finding.severity);
    }

    pub(crate) fn push_host(&mut self, host: HostResult) {
        self.hosts.push(host);
    }

    /// Accepts `records` as the conclusive policy. Only the first acceptance counts.
    pub(crate) fn accept(&mut self, records: &[CaaRecord]) {
        if self.found {
            return;
        }
        for record in records {
            match record.tag.as_str() {
                "issue" => self.issue.push(record.value.clone()),
                "issuewild" => self.issuewild.push(record.value.clone()),
                _ => {}
            }
        }
        self.found = true;
    }

    pub(crate) fn fail(&mut self, err: &ResolutionError) {
        self.error = true;
        self.error_message = err.to_string();
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
