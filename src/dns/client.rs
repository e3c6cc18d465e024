//! Resolver client: one DNS question in, one reply out.
//!
//! `Exchange` is the seam between the resolution engine and the network. The
//! production implementation, `NameserverClient`, speaks plain UDP to a single
//! nameserver with EDNS0 and the DNSSEC-OK bit so the reply carries a meaningful
//! authenticated-data flag.

use std::future::Future;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::net::UdpSocket;
use trust_dns_resolver::proto::error::ProtoError;
use trust_dns_resolver::proto::op::{Edns, Message, MessageType, OpCode, Query};
use trust_dns_resolver::proto::rr::{Name, RecordType};

use super::reply::Reply;
use crate::config::{EDNS_UDP_PAYLOAD, MAX_UDP_RESPONSE};
use crate::error_handling::ResolutionError;

/// Sends a single DNS question and returns the decoded reply.
///
/// Implementations must report a missing or unusable reply as
/// `ResolutionError::TransportError`. Response codes are not interpreted here.
/// Replies go through [`Reply::from_wire`], so a record the protocol crate
/// cannot parse never discards the rest of the answer.
pub trait Exchange {
    /// Asks `record_type` for `name` and waits for the reply.
    fn exchange(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> impl Future<Output = Result<Reply, ResolutionError>>;
}

/// UDP client bound to one nameserver endpoint.
#[derive(Debug, Clone)]
pub struct NameserverClient {
    nameserver: SocketAddr,
    timeout: Duration,
}

impl NameserverClient {
    /// Creates a client for `nameserver` with a per-query `timeout`.
    pub fn new(nameserver: SocketAddr, timeout: Duration) -> Self {
        Self {
            nameserver,
            timeout,
        }
    }

    /// Nameserver endpoint queries are sent to.
    pub fn nameserver(&self) -> SocketAddr {
        self.nameserver
    }

    async fn round_trip(&self, packet: &[u8]) -> std::io::Result<Vec<u8>> {
        let local: SocketAddr = if self.nameserver.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(self.nameserver).await?;
        socket.send(packet).await?;

        let mut buf = vec![0u8; MAX_UDP_RESPONSE];
        let len = socket.recv(&mut buf).await?;
        buf.truncate(len);
        Ok(buf)
    }
}

impl Exchange for NameserverClient {
    async fn exchange(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Reply, ResolutionError> {
        let query = build_query(name, record_type)
            .map_err(|e| ResolutionError::transport(name, format!("cannot build query: {e}")))?;
        let packet = query
            .to_vec()
            .map_err(|e| ResolutionError::transport(name, format!("cannot encode query: {e}")))?;

        log::trace!("{record_type} {name} -> {}", self.nameserver);
        let bytes = tokio::time::timeout(self.timeout, self.round_trip(&packet))
            .await
            .map_err(|_| {
                ResolutionError::transport(
                    name,
                    format!("query timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| ResolutionError::transport(name, e))?;

        let reply = Reply::from_wire(&bytes)
            .map_err(|e| ResolutionError::transport(name, format!("malformed reply: {e}")))?;
        if reply.id() != query.id() {
            return Err(ResolutionError::transport(
                name,
                "reply id does not match query",
            ));
        }
        Ok(reply)
    }
}

/// Builds a recursive query for `name` with EDNS0 and the DNSSEC-OK bit set.
///
/// # Errors
///
/// Returns a `ProtoError` if `name` is not a valid domain name.
pub fn build_query(name: &str, record_type: RecordType) -> Result<Message, ProtoError> {
    let name = Name::from_ascii(fqdn(name))?;

    let mut message = Message::new();
    message
        .set_id(rand::random::<u16>())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .set_authentic_data(true);
    message.add_query(Query::query(name, record_type));

    let edns = message.extensions_mut().get_or_insert_with(Edns::new);
    edns.set_max_payload(EDNS_UDP_PAYLOAD);
    edns.set_dnssec_ok(true);

    Ok(message)
}

fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}
