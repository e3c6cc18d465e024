//! Registrable-domain classification and label-hierarchy helpers.
//!
//! This module uses the Public Suffix List (via `tldextract`, plus a bundled copy
//! of the list's private section) to find the registrable domain of a hostname and
//! converts names to their ASCII-compatible form (via the IDNA processing in `url`).
//!
//! Key functions:
//! - `classify()` - Registrable domain plus ASCII forms of both names
//! - `intermediate_names()` - Names strictly between a hostname and its registrable domain

mod private;

use tldextract::TldExtractor;

use crate::error_handling::ResolutionError;
use private::private_suffix_labels;

/// Result of classifying a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// ASCII-compatible form of the hostname, without a trailing dot
    pub hostname: String,
    /// ASCII-compatible registrable domain (e.g. `example.co.uk`)
    pub registrable_domain: String,
}

impl Classification {
    /// Returns `true` if the hostname is its own registrable domain.
    pub fn is_registrable(&self) -> bool {
        self.hostname == self.registrable_domain
    }
}

/// Classifies a lowercase hostname.
///
/// # Errors
///
/// Returns `DomainClassificationError` if the hostname is an IP address or has no
/// recognizable public suffix, and `EncodingError` if either name cannot be
/// converted to ASCII.
pub fn classify(extractor: &TldExtractor, hostname: &str) -> Result<Classification, ResolutionError> {
    let host = hostname.trim_end_matches('.');
    let registrable = registrable_domain(extractor, host)?;
    Ok(Classification {
        registrable_domain: to_ascii(&registrable)?,
        hostname: to_ascii(host)?,
    })
}

/// Extracts the registrable domain of a hostname using the Public Suffix List.
///
/// # Errors
///
/// Returns `DomainClassificationError` if the hostname is an IP address, if the
/// extractor fails, if it yields no suffix or no domain label, or if the hostname
/// is itself a private suffix such as `github.io`.
pub fn registrable_domain(extractor: &TldExtractor, host: &str) -> Result<String, ResolutionError> {
    // IP addresses don't have registrable domains
    if host.is_empty() || host.parse::<std::net::IpAddr>().is_ok() {
        return Err(ResolutionError::DomainClassificationError(format!(
            "cannot derive registrable domain for {host:?}"
        )));
    }

    // The extractor parses URL input, not bare hostnames
    let result = extractor
        .extract(&format!("http://{host}"))
        .map_err(|e| ResolutionError::DomainClassificationError(e.to_string()))?;

    let registrable = match (result.domain, result.suffix) {
        (Some(domain), Some(suffix)) if !domain.is_empty() && !suffix.is_empty() => {
            format!("{domain}.{suffix}")
        }
        _ => {
            return Err(ResolutionError::DomainClassificationError(format!(
                "cannot derive registrable domain for {host:?}"
            )))
        }
    };

    // A longer private suffix moves the registrable domain down
    let Ok(ascii) = to_ascii(host) else {
        return Ok(registrable);
    };
    match private_suffix_labels(&ascii) {
        Some(labels) if labels >= registrable.split('.').count() => {
            if ascii.split('.').count() <= labels {
                return Err(ResolutionError::DomainClassificationError(format!(
                    "{host:?} is a public suffix"
                )));
            }
            Ok(ascii
                .rmatch_indices('.')
                .nth(labels)
                .map_or(ascii.as_str(), |(i, _)| &ascii[i + 1..])
                .to_string())
        }
        _ => Ok(registrable),
    }
}

/// Converts a name to its ASCII-compatible encoding.
///
/// # Errors
///
/// Returns `EncodingError` if IDNA processing fails or the name is an IP address.
pub fn to_ascii(name: &str) -> Result<String, ResolutionError> {
    match url::Host::parse(name) {
        Ok(url::Host::Domain(ascii)) => Ok(ascii),
        Ok(_) => Err(ResolutionError::EncodingError {
            name: name.to_string(),
            reason: "not a domain name".to_string(),
        }),
        Err(e) => Err(ResolutionError::EncodingError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Names strictly between `hostname` and `registrable`, most specific first.
///
/// For `a.b.c.example.com` under `example.com` this yields `b.c.example.com` and
/// `c.example.com`. Each name is a suffix slice of `hostname`, located by the label
/// boundaries of the subdomain part. Returns nothing when `hostname` is not below
/// `registrable`.
pub fn intermediate_names<'a>(hostname: &'a str, registrable: &str) -> Vec<&'a str> {
    let Some(subdomain) = hostname
        .strip_suffix(registrable)
        .and_then(|rest| rest.strip_suffix('.'))
    else {
        return Vec::new();
    };

    subdomain
        .match_indices('.')
        .map(|(index, _)| &hostname[index + 1..])
        .collect()
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
