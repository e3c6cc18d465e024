//! CAA resolution engine.
//!
//! Walks the label hierarchy of a hostname from its exact form up to its
//! registrable domain, chasing CNAME targets on the way, and decides level by
//! level whether a conclusive CAA set was found.
//!
//! Walk order for `a.b.example.com` under `example.com`:
//!
//! ```text
//! example.com          queried first, held back as the fallback
//! a.b.example.com      leaf
//! <cname of leaf>      if any
//! b.example.com        intermediate levels, most specific first,
//! <cname of level>     each followed by its CNAME target
//! example.com          fallback result, evaluated last
//! ```
//!
//! Each intermediate level is recorded and evaluated before its CNAME target,
//! the same order as the leaf. In full mode `host` therefore lists a level
//! ahead of the alias it points to.
//!
//! In summary mode the first non-empty record set ends the walk. In full mode
//! every level is queried and nothing is accepted.

use log::{debug, info, warn};
use tldextract::TldExtractor;

use super::policy::{assess_reply, lookup_failure, Finding, Severity};
use super::report::{HostResult, Outcome, Report};
use crate::config::{AliasRecordSource, DNSSEC_FOUND_MESSAGE};
use crate::dns::{fetch_caa, fetch_cname, fetch_dname, lookup_authority, CaaRecord, Exchange};
use crate::domain::{classify, intermediate_names};
use crate::error_handling::ResolutionError;

/// Resolves CAA policy reports through an `Exchange`.
pub struct CaaEngine<'a, E> {
    exchange: &'a E,
    extractor: &'a TldExtractor,
    full: bool,
    alias_records: AliasRecordSource,
}

impl<'a, E: Exchange> CaaEngine<'a, E> {
    /// Creates a summary-mode engine.
    pub fn new(exchange: &'a E, extractor: &'a TldExtractor) -> Self {
        Self {
            exchange,
            extractor,
            full: false,
            alias_records: AliasRecordSource::Target,
        }
    }

    /// Disables early termination and policy acceptance.
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    /// Selects the record set used for issuer lists on CNAME acceptance.
    pub fn alias_records(mut self, source: AliasRecordSource) -> Self {
        self.alias_records = source;
        self
    }

    /// Resolves the CAA policy of `hostname`.
    ///
    /// Never fails: fatal errors are recorded in the report's error fields along
    /// with whatever progress was made before them.
    pub async fn resolve(&self, hostname: &str) -> Report {
        let hostname = hostname.to_lowercase();
        let mut report = Report::new(&hostname);

        match self.walk(&hostname, &mut report).await {
            Ok(Outcome::Accepted) => info!(
                "{hostname}: CAA policy accepted (issue: {:?}, issuewild: {:?})",
                report.issue(),
                report.issuewild()
            ),
            Ok(_) => info!(
                "{hostname}: walk finished after {} lookups without accepting a CAA set",
                report.hosts().len()
            ),
            Err(err) => {
                warn!("{hostname}: resolution failed: {err}");
                report.fail(&err);
            }
        }
        report
    }

    async fn walk(&self, hostname: &str, report: &mut Report) -> Result<Outcome, ResolutionError> {
        let names = classify(self.extractor, hostname)?;
        let zone = names.registrable_domain.as_str();

        let authority = lookup_authority(self.exchange, zone).await?;
        report.set_dnssec(authority.dnssec);
        if authority.dnssec {
            report.add_control(DNSSEC_FOUND_MESSAGE, Severity::Advisory);
        }
        let nameserver = authority.confirmed()?;
        debug!("{zone}: authority {nameserver} (dnssec: {})", authority.dnssec);

        let mut walk = Walk {
            exchange: self.exchange,
            report,
            zone_dnssec: authority.dnssec,
            full: self.full,
        };

        let fallback = walk.lookup(zone).await;

        let leaf = walk.lookup(&names.hostname).await;
        let leaf_records = leaf.caa_records.clone();
        let leaf_cname = leaf.cname.clone();
        if walk.settle(leaf) {
            return Ok(Outcome::Accepted);
        }
        if let Some(target) = leaf_cname {
            if self.chase(&mut walk, &target, &leaf_records).await {
                return Ok(Outcome::Accepted);
            }
        }

        if names.is_registrable() {
            return Ok(Outcome::Exhausted);
        }

        for name in intermediate_names(&names.hostname, zone) {
            let level = walk.lookup(name).await;
            let level_cname = level.cname.clone();
            if walk.settle(level) {
                return Ok(Outcome::Accepted);
            }
            if let Some(target) = level_cname {
                if self.chase(&mut walk, &target, &leaf_records).await {
                    return Ok(Outcome::Accepted);
                }
            }
        }

        if walk.settle(fallback) {
            return Ok(Outcome::Accepted);
        }
        Ok(Outcome::Exhausted)
    }

    /// Queries a CNAME target and applies the accept rule to it.
    async fn chase(&self, walk: &mut Walk<'_, E>, target: &str, leaf_records: &[CaaRecord]) -> bool {
        let aliased = walk.lookup(target.trim_end_matches('.')).await;
        match self.alias_records {
            AliasRecordSource::Target => walk.settle(aliased),
            AliasRecordSource::Origin => {
                walk.report.push_host(aliased);
                walk.accept(leaf_records)
            }
        }
    }
}

/// State of one in-progress walk.
struct Walk<'r, E> {
    exchange: &'r E,
    report: &'r mut Report,
    zone_dnssec: bool,
    full: bool,
}

impl<E: Exchange> Walk<'_, E> {
    /// Issues the CAA lookup for `name` (plus its CNAME and DNAME lookups) and
    /// records the controls it raises.
    async fn lookup(&mut self, name: &str) -> HostResult {
        debug!("Querying CAA at {name}");
        let mut host = HostResult::new(name);

        match fetch_caa(self.exchange, name).await {
            Ok(answer) => {
                self.assess(name, answer.authenticated, answer.response_code);
                host.caa_records = answer.records;
                host.authenticated_data = answer.authenticated;
                host.response_code = answer.response_code;
                host.cname = alias(name, "CNAME", fetch_cname(self.exchange, name).await);
                host.dname = alias(name, "DNAME", fetch_dname(self.exchange, name).await);
            }
            Err(ResolutionError::LookupError {
                code,
                authenticated,
                ..
            }) => {
                debug!("{name}: CAA lookup returned response code {code}");
                self.assess(name, authenticated, code);
                host.authenticated_data = authenticated;
                host.response_code = code;
            }
            Err(err) => self.record(lookup_failure(self.zone_dnssec, &err)),
        }
        host
    }

    /// Appends `host` to the report and accepts its records if they are conclusive.
    fn settle(&mut self, host: HostResult) -> bool {
        let records = host.caa_records.clone();
        self.report.push_host(host);
        self.accept(&records)
    }

    fn accept(&mut self, records: &[CaaRecord]) -> bool {
        if self.full || records.is_empty() {
            return false;
        }
        self.report.accept(records);
        true
    }

    fn assess(&mut self, name: &str, authenticated: bool, code: u16) {
        for finding in assess_reply(self.zone_dnssec, name, authenticated, code) {
            self.record(finding);
        }
    }

    fn record(&mut self, finding: Finding) {
        if finding.severity.is_blocking() {
            warn!("{}", finding.message);
        } else {
            info!("{}", finding.message);
        }
        self.report.add_finding(finding);
    }
}

fn alias(name: &str, kind: &str, result: Result<Option<String>, ResolutionError>) -> Option<String> {
    match result {
        Ok(target) => target,
        Err(err) => {
            debug!("{name}: {kind} lookup failed: {err}");
            None
        }
    }
}
