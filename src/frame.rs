//! Whole-frame decoding.
use crate::{enet, icmp, ipv4, reader::Reader, tcp, udp, Result};
use tracing::{debug, warn};

/// A decoded frame: the Ethernet header, plus whatever could be decoded
/// beneath it.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Frame {
    ethernet: enet::Header,
    ip: Option<ipv4::Header>,
    transport: Option<Transport>,
    len: usize,
}

impl Frame {
    /// Extract the Ethernet header.
    #[inline]
    #[must_use]
    pub fn ethernet(&self) -> &enet::Header {
        &self.ethernet
    }

    /// Extract the IPv4 header. `None` when the ethertype isn't IPv4.
    #[inline]
    #[must_use]
    pub fn ip(&self) -> Option<&ipv4::Header> {
        self.ip.as_ref()
    }

    /// Extract the transport header. `None` when there's no IPv4 header.
    #[inline]
    #[must_use]
    pub fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    /// The sampled bytes from the start of a TCP or UDP header.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> {
        match self.transport.as_ref()? {
            Transport::Tcp(segment) => Some(segment.sample()),
            Transport::Udp(datagram) => Some(datagram.sample()),
            Transport::Icmp(_) | Transport::Unknown(_) => None,
        }
    }

    /// Total length of the captured frame.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }
}

/// The transport header, selected by the IP protocol number.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Transport {
    Icmp(icmp::Header),
    Tcp(tcp::Segment),
    Udp(udp::Datagram),
    /// A protocol this crate doesn't decode. Holds the protocol number.
    Unknown(u8),
}

/// Decode a captured Ethernet frame.
///
/// Frames with a non-IPv4 ethertype decode to just the Ethernet header, and
/// IPv4 packets carrying something other than ICMP, TCP or UDP decode to
/// [`Transport::Unknown`]. Neither is an error.
///
/// # Errors
///
/// Fails with [`Error::TruncatedInput`](crate::Error::TruncatedInput) when a
/// header runs past the end of `bytes`.
pub fn decode(bytes: &[u8]) -> Result<Frame> {
    debug!(len = bytes.len(), "decoding frame");
    let mut reader = Reader::new(bytes);

    let ethernet = enet::Header::read(&mut reader)?;
    let mut frame = Frame {
        ethernet,
        ip: None,
        transport: None,
        len: bytes.len(),
    };

    if ethernet.ethertype() != enet::EtherType::Ipv4 {
        debug!(ethertype = ?ethernet.ethertype(), "not an IPv4 datagram");
        return Ok(frame);
    }

    let ip = ipv4::Header::read(&mut reader)?;
    let transport = match ip.protocol() {
        ipv4::Protocol::Icmp => Transport::Icmp(icmp::Header::read(&mut reader)?),
        ipv4::Protocol::Tcp => Transport::Tcp(tcp::Segment::read(&mut reader)?),
        ipv4::Protocol::Udp => Transport::Udp(udp::Datagram::read(&mut reader)?),
        ipv4::Protocol::Unknown(protocol) => {
            warn!(protocol, "unsupported protocol");
            Transport::Unknown(protocol)
        }
    };

    frame.ip = Some(ip);
    frame.transport = Some(transport);
    Ok(frame)
}
