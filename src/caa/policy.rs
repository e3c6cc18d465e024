//! DNSSEC consistency checks and the response-code advisory table.
//!
//! The table only applies when the registrable domain's zone is DNSSEC-enabled;
//! in an unsigned zone failing response codes are not evidence of tampering.

use crate::error_handling::ResolutionError;

/// How a control affects issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational; never blocks.
    Advisory,
    /// Labeled blocking and raises the report's overall blocking flag.
    Blocking,
    /// Labeled blocking but leaves the overall flag untouched (NOTIMPL).
    BlockingWithoutEscalation,
}

impl Severity {
    /// Value of the control's own `blocking` label.
    pub fn is_blocking(self) -> bool {
        !matches!(self, Self::Advisory)
    }

    /// Whether recording the control raises the report's `blocking` flag.
    pub fn escalates(self) -> bool {
        matches!(self, Self::Blocking)
    }
}

/// A control to be appended to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Control text
    pub message: String,
    /// Effect on issuance
    pub severity: Severity,
}

impl Finding {
    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// One row of the response-code table; `control` is `None` for codes that are
/// not diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct RcodeRule {
    /// DNS response code
    pub code: u16,
    /// Message and severity recorded for the code
    pub control: Option<(&'static str, Severity)>,
}

/// Response-code table for DNSSEC-enabled zones.
pub const RCODE_RULES: &[RcodeRule] = &[
    RcodeRule {
        code: 0,
        control: None,
    },
    RcodeRule {
        code: 1,
        control: Some((
            "DNS code 1, FORMERR, if DNSSEC is on, CA may not issue.",
            Severity::Blocking,
        )),
    },
    RcodeRule {
        code: 2,
        control: Some((
            "DNS code 2, SERVFAIL, if DNSSEC is on, CA may not issue.",
            Severity::Blocking,
        )),
    },
    RcodeRule {
        code: 3,
        control: None,
    },
    RcodeRule {
        code: 4,
        control: Some((
            "DNS code 4, NOTIMPL, if DNSSEC is on, CA may not issue.",
            Severity::BlockingWithoutEscalation,
        )),
    },
    RcodeRule {
        code: 5,
        control: Some((
            "DNS code 5, REFUSED, if DNSSEC is on, CA may not issue.",
            Severity::Blocking,
        )),
    },
];

/// Control for any code missing from [`RCODE_RULES`].
pub const UNKNOWN_RCODE: (&str, Severity) = (
    "Unknown DNS code, if DNSSEC is on, CA may not issue.",
    Severity::Blocking,
);

/// Control prescribed for `code` in a DNSSEC-enabled zone.
pub fn rcode_control(code: u16) -> Option<(&'static str, Severity)> {
    match RCODE_RULES.iter().find(|rule| rule.code == code) {
        Some(rule) => rule.control,
        None => Some(UNKNOWN_RCODE),
    }
}

/// Controls raised by one received reply, in the order they are recorded.
///
/// In a DNSSEC-enabled zone a reply without the AD bit is blocking, then the
/// response code is looked up in the table. An unsigned zone raises nothing.
pub fn assess_reply(zone_dnssec: bool, name: &str, authenticated: bool, code: u16) -> Vec<Finding> {
    if !zone_dnssec {
        return Vec::new();
    }

    let mut findings = Vec::new();
    if !authenticated {
        findings.push(Finding::new(
            format!("DNSSEC valid on domain but invalid on subdomain {name}. CA may not issue."),
            Severity::Blocking,
        ));
    }
    if let Some((message, severity)) = rcode_control(code) {
        findings.push(Finding::new(message, severity));
    }
    findings
}

/// Control raised when a query got no reply at all.
pub fn lookup_failure(zone_dnssec: bool, err: &ResolutionError) -> Finding {
    if zone_dnssec {
        Finding::new(
            format!("Lookup error and DNSSEC enabled: {err}"),
            Severity::Blocking,
        )
    } else {
        Finding::new(format!("Lookup error: {err}"), Severity::Advisory)
    }
}
