//! In-memory `Exchange` that answers from a fixed table.
//!
//! Used to evaluate walks offline: every question is looked up by
//! `(name, record type)`, unscripted questions get an empty NOERROR reply, and the
//! order of questions is recorded. Scripted messages are encoded to wire format and
//! decoded with [`Reply::from_wire`], the same path network replies take.

use std::cell::RefCell;
use std::collections::HashMap;

use trust_dns_resolver::proto::op::{Message, MessageType, ResponseCode};
use trust_dns_resolver::proto::rr::rdata::NULL;
use trust_dns_resolver::proto::rr::{Name, RData, Record, RecordType};

use super::client::Exchange;
use super::reply::Reply;
use crate::error_handling::ResolutionError;

enum Scripted {
    Message(Message),
    Wire(Vec<u8>),
    Failure(String),
}

/// Scripted resolver client.
pub struct ScriptedExchange {
    authenticated: bool,
    replies: HashMap<(String, RecordType), Scripted>,
    queries: RefCell<Vec<(String, RecordType)>>,
}

impl ScriptedExchange {
    /// Creates an exchange whose unscripted replies carry the given AD flag.
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            replies: HashMap::new(),
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Answers `record_type` questions for `name` with `reply`.
    pub fn reply(mut self, name: &str, record_type: RecordType, reply: Message) -> Self {
        self.replies
            .insert((normalize(name), record_type), Scripted::Message(reply));
        self
    }

    /// Answers with a NOERROR reply holding `answers`, using the exchange's AD flag.
    pub fn answer(self, name: &str, record_type: RecordType, answers: Vec<RData>) -> Self {
        let reply = response(ResponseCode::NoError, self.authenticated, answers);
        self.reply(name, record_type, reply)
    }

    /// Answers with an empty reply carrying `code`, using the exchange's AD flag.
    pub fn rcode(self, name: &str, record_type: RecordType, code: ResponseCode) -> Self {
        let reply = response(code, self.authenticated, Vec::new());
        self.reply(name, record_type, reply)
    }

    /// Answers with raw wire bytes, decoded as they are.
    pub fn wire(mut self, name: &str, record_type: RecordType, bytes: Vec<u8>) -> Self {
        self.replies
            .insert((normalize(name), record_type), Scripted::Wire(bytes));
        self
    }

    /// Fails `record_type` questions for `name` as if no reply arrived.
    pub fn fail(mut self, name: &str, record_type: RecordType, reason: &str) -> Self {
        self.replies.insert(
            (normalize(name), record_type),
            Scripted::Failure(reason.to_string()),
        );
        self
    }

    /// Every question received so far, in order.
    pub fn queries(&self) -> Vec<(String, RecordType)> {
        self.queries.borrow().clone()
    }

    /// Names asked for `record_type`, in order.
    pub fn queries_for(&self, record_type: RecordType) -> Vec<String> {
        self.queries
            .borrow()
            .iter()
            .filter(|(_, rtype)| *rtype == record_type)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Exchange for ScriptedExchange {
    async fn exchange(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Reply, ResolutionError> {
        let key = (normalize(name), record_type);
        self.queries.borrow_mut().push(key.clone());

        let bytes = match self.replies.get(&key) {
            Some(Scripted::Message(message)) => encode(name, message)?,
            Some(Scripted::Wire(bytes)) => bytes.clone(),
            Some(Scripted::Failure(reason)) => return Err(ResolutionError::transport(name, reason)),
            None => encode(
                name,
                &response(ResponseCode::NoError, self.authenticated, Vec::new()),
            )?,
        };
        Reply::from_wire(&bytes)
            .map_err(|e| ResolutionError::transport(name, format!("malformed reply: {e}")))
    }
}

/// Builds a reply message. Answer owner names are left at the root; fetchers
/// only read the record data.
pub fn response(code: ResponseCode, authenticated: bool, answers: Vec<RData>) -> Message {
    let mut message = Message::new();
    message
        .set_message_type(MessageType::Response)
        .set_response_code(code)
        .set_authentic_data(authenticated);
    for rdata in answers {
        message.add_answer(Record::from_rdata(Name::root(), 300, rdata));
    }
    message
}

/// CAA answer carried as opaque rdata, encoded byte for byte on the wire.
///
/// Lets fixtures hold flags, tags and values the protocol crate's CAA type
/// would reject or rewrite.
pub fn raw_caa(flag: u8, tag: &str, value: &str) -> RData {
    let mut rdata = Vec::with_capacity(2 + tag.len() + value.len());
    rdata.push(flag);
    rdata.push(tag.len() as u8);
    rdata.extend_from_slice(tag.as_bytes());
    rdata.extend_from_slice(value.as_bytes());
    RData::Unknown {
        code: u16::from(RecordType::CAA),
        rdata: NULL::with(rdata),
    }
}

fn encode(name: &str, message: &Message) -> Result<Vec<u8>, ResolutionError> {
    message
        .to_vec()
        .map_err(|e| ResolutionError::transport(name, format!("cannot encode reply: {e}")))
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_lowercase()
}
