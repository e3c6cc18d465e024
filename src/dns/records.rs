//! Record fetchers (CAA, CNAME, DNAME).
//!
//! Each fetcher issues exactly one question through an `Exchange` and
//! extracts the matching answers. A non-success response code is reported as
//! `ResolutionError::LookupError` with the raw code; callers decide what it means.

use serde::Serialize;
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::proto::rr::{Name, RData, RecordType};
use trust_dns_resolver::proto::serialize::binary::{BinDecodable, BinDecoder};

use super::client::Exchange;
use super::reply::{Answer, Reply};
use crate::error_handling::ResolutionError;

/// DNAME record type code (RFC 6672); not modelled by the protocol crate.
pub const DNAME: RecordType = RecordType::Unknown(39);

/// A CAA record with tag and value normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaaRecord {
    /// Flags octet as received
    pub flag: u8,
    /// Property tag, e.g. `issue`
    pub tag: String,
    /// Property value text as received
    pub value: String,
}

impl CaaRecord {
    /// Creates a record, lowercasing `tag` and `value`.
    pub fn new(flag: u8, tag: &str, value: &str) -> Self {
        Self {
            flag,
            tag: tag.to_lowercase(),
            value: value.to_lowercase(),
        }
    }

    /// Reads raw CAA rdata: flags octet, tag length, tag, then the value up to
    /// the end of the rdata.
    ///
    /// Returns `None` for an empty tag or a tag length running past the rdata.
    /// The value is taken verbatim, so `;` and `a.example ; key=v` survive intact.
    pub fn from_wire(rdata: &[u8]) -> Option<Self> {
        let (&flag, rest) = rdata.split_first()?;
        let (&tag_len, rest) = rest.split_first()?;
        let tag_len = usize::from(tag_len);
        if tag_len == 0 || tag_len > rest.len() {
            return None;
        }
        let (tag, value) = rest.split_at(tag_len);
        Some(Self::new(
            flag,
            &String::from_utf8_lossy(tag),
            &String::from_utf8_lossy(value),
        ))
    }

    /// Issuer-critical bit (bit 0 of the flags octet).
    pub fn is_critical(&self) -> bool {
        self.flag & 0x80 != 0
    }
}

/// CAA records of one name, as answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaaAnswer {
    /// CAA records in answer order
    pub records: Vec<CaaRecord>,
    /// Authenticated-data flag of this specific reply
    pub authenticated: bool,
    /// Response code of the reply
    pub response_code: u16,
}

/// Fetches the CAA records of `name`.
///
/// # Errors
///
/// `TransportError` when no reply arrives, `LookupError` when the reply's response
/// code is not NOERROR. No records are extracted from a non-success reply.
pub async fn fetch_caa<E: Exchange>(exchange: &E, name: &str) -> Result<CaaAnswer, ResolutionError> {
    let reply = exchange.exchange(name, RecordType::CAA).await?;
    let response_code = successful(name, &reply)?;

    let records = reply
        .answers()
        .iter()
        .filter_map(|answer| match answer {
            Answer::Caa(record) => Some(record.clone()),
            Answer::Record(_) => None,
        })
        .collect();

    Ok(CaaAnswer {
        records,
        authenticated: reply.authentic_data(),
        response_code,
    })
}

/// Fetches the CNAME target of `name`, fully qualified with its trailing dot.
///
/// If several CNAME answers come back the last one wins.
///
/// # Errors
///
/// `TransportError` or `LookupError` as for [`fetch_caa`].
pub async fn fetch_cname<E: Exchange>(
    exchange: &E,
    name: &str,
) -> Result<Option<String>, ResolutionError> {
    let reply = exchange.exchange(name, RecordType::CNAME).await?;
    successful(name, &reply)?;

    Ok(reply
        .records()
        .filter_map(|rdata| match rdata {
            RData::CNAME(cname) => Some(cname.0.to_string()),
            _ => None,
        })
        .last())
}

/// Fetches the DNAME target of `name`, fully qualified with its trailing dot.
///
/// If several DNAME answers come back the last one wins; undecodable rdata is skipped.
///
/// # Errors
///
/// `TransportError` or `LookupError` as for [`fetch_caa`].
pub async fn fetch_dname<E: Exchange>(
    exchange: &E,
    name: &str,
) -> Result<Option<String>, ResolutionError> {
    let reply = exchange.exchange(name, DNAME).await?;
    successful(name, &reply)?;

    Ok(reply
        .records()
        .filter_map(|rdata| match rdata {
            RData::Unknown { code: 39, rdata } => decode_dname_target(rdata.anything()),
            _ => None,
        })
        .last())
}

/// Decodes a DNAME target from its rdata (an uncompressed domain name).
pub fn decode_dname_target(rdata: &[u8]) -> Option<String> {
    let mut decoder = BinDecoder::new(rdata);
    Name::read(&mut decoder).ok().map(|name| name.to_string())
}

fn successful(name: &str, reply: &Reply) -> Result<u16, ResolutionError> {
    let code = reply.response_code();
    if code == ResponseCode::NoError {
        Ok(u16::from(code))
    } else {
        Err(ResolutionError::LookupError {
            name: name.to_string(),
            code: u16::from(code),
            authenticated: reply.authentic_data(),
        })
    }
}
