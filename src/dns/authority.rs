//! SOA authority lookup for the registrable domain.

use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::proto::rr::{RData, RecordType};

use super::client::Exchange;
use crate::error_handling::ResolutionError;

/// The zone's SOA owner and its DNSSEC status.
///
/// A NOERROR reply without an SOA record still carries a DNSSEC status; the
/// missing owner only turns fatal through [`Authority::confirmed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    /// Primary nameserver (SOA MNAME), if the answer held an SOA record
    pub nameserver: Option<String>,
    /// Authenticated-data flag of the SOA reply
    pub dnssec: bool,
}

impl Authority {
    /// Primary nameserver of the zone.
    ///
    /// # Errors
    ///
    /// Returns `DomainNotFoundError("Domain not found")` when the SOA answer was empty.
    pub fn confirmed(&self) -> Result<&str, ResolutionError> {
        self.nameserver
            .as_deref()
            .ok_or_else(|| ResolutionError::DomainNotFoundError("Domain not found".to_string()))
    }
}

/// Asks for the SOA record of `domain`.
///
/// # Errors
///
/// Returns `TransportError` if no reply is received, and `DomainNotFoundError` if
/// the response code is not NOERROR.
pub async fn lookup_authority<E: Exchange>(
    exchange: &E,
    domain: &str,
) -> Result<Authority, ResolutionError> {
    let reply = exchange.exchange(domain, RecordType::SOA).await?;

    if reply.response_code() != ResponseCode::NoError {
        return Err(ResolutionError::DomainNotFoundError(
            "domain lookup not successful".to_string(),
        ));
    }

    let nameserver = reply
        .records()
        .filter_map(|rdata| match rdata {
            RData::SOA(soa) => Some(soa.mname().to_string()),
            _ => None,
        })
        .last();

    Ok(Authority {
        nameserver,
        dnssec: reply.authentic_data(),
    })
}
