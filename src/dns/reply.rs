//! Reply decoding.
//!
//! Replies are decoded answer by answer instead of through `Message::from_vec`.
//! CAA rdata is read in its raw form (flag octet, tag length, tag, value) so
//! values the protocol crate refuses, like `"ca.example ; key=value"` or labels
//! with `_`, still reach the report. An answer that cannot be decoded is
//! skipped; only a broken header or record framing fails the whole reply.

use log::debug;
use trust_dns_resolver::proto::error::ProtoError;
use trust_dns_resolver::proto::op::{Header, Query, ResponseCode};
use trust_dns_resolver::proto::rr::{Name, RData, RecordType};
use trust_dns_resolver::proto::serialize::binary::{BinDecodable, BinDecoder, Restrict};

use super::records::CaaRecord;

/// One decoded answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// CAA record read from raw rdata
    Caa(CaaRecord),
    /// Any other record, decoded by the protocol crate
    Record(RData),
}

/// The parts of a DNS reply the fetchers read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    id: u16,
    response_code: ResponseCode,
    authentic_data: bool,
    answers: Vec<Answer>,
}

impl Reply {
    /// Decodes a reply from wire format.
    ///
    /// Only the header's 4-bit response code is read; extended codes carried in
    /// an OPT record are not combined in.
    ///
    /// # Errors
    ///
    /// Returns a `ProtoError` if the header, a question or the framing of an
    /// answer record is truncated or malformed.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, ProtoError> {
        let mut decoder = BinDecoder::new(bytes);
        let header = Header::read(&mut decoder)?;

        for _ in 0..header.query_count() {
            Query::read(&mut decoder)?;
        }

        let mut answers = Vec::with_capacity(usize::from(header.answer_count()));
        for _ in 0..header.answer_count() {
            Name::read(&mut decoder)?;
            let record_type = RecordType::from(decoder.read_u16()?.unverified());
            decoder.read_u16()?; // class
            decoder.read_u32()?; // ttl
            let length = decoder.read_u16()?.unverified();
            let start = decoder.index();
            let rdata = decoder.read_slice(usize::from(length))?.unverified();

            match decode_answer(bytes, start, record_type, length, rdata) {
                Some(answer) => answers.push(answer),
                None => debug!("skipping undecodable {record_type} answer"),
            }
        }

        Ok(Self {
            id: header.id(),
            response_code: header.response_code(),
            authentic_data: header.authentic_data(),
            answers,
        })
    }

    /// Message id.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Response code from the header.
    pub fn response_code(&self) -> ResponseCode {
        self.response_code
    }

    /// Authenticated-data flag.
    pub fn authentic_data(&self) -> bool {
        self.authentic_data
    }

    /// Decoded answers in wire order.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Record data of every non-CAA answer.
    pub fn records(&self) -> impl Iterator<Item = &RData> {
        self.answers.iter().filter_map(|answer| match answer {
            Answer::Record(rdata) => Some(rdata),
            Answer::Caa(_) => None,
        })
    }
}

fn decode_answer(
    message: &[u8],
    start: usize,
    record_type: RecordType,
    length: u16,
    rdata: &[u8],
) -> Option<Answer> {
    if record_type == RecordType::CAA {
        return CaaRecord::from_wire(rdata).map(Answer::Caa);
    }

    // Names inside rdata may point anywhere in the message, so decode in place
    let mut decoder = BinDecoder::new(message);
    decoder.read_slice(start).ok()?;
    RData::read(&mut decoder, record_type, Restrict::new(length))
        .ok()
        .map(Answer::Record)
}
