//! Ethernet MAC frame headers.
//!
//! ## Standards conformance
//!
//! This implementation follows the [2022 IEEE Standard for
//! Ethernet](https://standards.ieee.org/ieee/802.3/10422/).
//!
//! Only the 14-byte MAC header is decoded. The preamble and start frame
//! delimiter are layer 1 components that the NIC strips, and the frame check
//! sequence is ignored because checksum offloading often leaves it
//! inaccurate or missing.
use crate::{reader::Reader, Result};
use std::fmt::{self, Debug, Display};

/// A decoded Ethernet header.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Header {
    dest: MacAddr,
    source: MacAddr,
    ethertype: EtherType,
}

impl Header {
    /// Read the Ethernet header from the cursor.
    ///
    /// # Errors
    ///
    /// Fails when fewer than [`HEADER_LEN`] bytes remain.
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        reader.require(NAME, HEADER_LEN)?;
        let dest = MacAddr::from(reader.array::<6>(NAME)?);
        let source = MacAddr::from(reader.array::<6>(NAME)?);
        let ethertype = EtherType::from(reader.u16(NAME)?);
        Ok(Self {
            dest,
            source,
            ethertype,
        })
    }

    /// Extract the destination MAC address.
    #[inline]
    #[must_use]
    pub fn dest(&self) -> MacAddr {
        self.dest
    }

    /// Extract the source MAC address.
    #[inline]
    #[must_use]
    pub fn source(&self) -> MacAddr {
        self.source
    }

    /// Extract the ethertype field.
    #[inline]
    #[must_use]
    pub fn ethertype(&self) -> EtherType {
        self.ethertype
    }
}

/// See the [IANA list of EtherType
/// values](https://www.iana.org/assignments/ieee-802-numbers/ieee-802-numbers.xhtml#ieee-802-numbers-1).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EtherType {
    Arp,
    Ipv4,
    Ipv6,
    Unknown(u16),
}

impl EtherType {
    /// Short name used in the report.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            EtherType::Arp => "ARP",
            EtherType::Ipv4 => "IP",
            EtherType::Ipv6 => "IPv6",
            EtherType::Unknown(_) => "unknown",
        }
    }
}

impl From<EtherType> for u16 {
    fn from(value: EtherType) -> Self {
        match value {
            EtherType::Arp => ETHERTYPE_ARP,
            EtherType::Ipv4 => ETHERTYPE_IPV4,
            EtherType::Ipv6 => ETHERTYPE_IPV6,
            EtherType::Unknown(typ) => typ,
        }
    }
}

impl From<u16> for EtherType {
    fn from(value: u16) -> Self {
        match value {
            ETHERTYPE_ARP => EtherType::Arp,
            ETHERTYPE_IPV4 => EtherType::Ipv4,
            ETHERTYPE_IPV6 => EtherType::Ipv6,
            _ => EtherType::Unknown(value),
        }
    }
}

/// A MAC address.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MacAddr {
    octets: [u8; 6],
}

impl MacAddr {
    /// Create a new [`MacAddr`] instance.
    #[inline]
    #[must_use]
    pub fn new(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8) -> Self {
        Self {
            octets: [a, b, c, d, e, f],
        }
    }

    /// The raw address bytes.
    #[inline]
    #[must_use]
    pub fn octets(&self) -> [u8; 6] {
        self.octets
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        MacAddr { octets }
    }
}

impl Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.octets;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Size of the Ethernet header.
pub const HEADER_LEN: usize = 14;

const NAME: &str = "ethernet";

// EtherType code for IPv4.
const ETHERTYPE_IPV4: u16 = 0x800;

// EtherType code for ARP.
const ETHERTYPE_ARP: u16 = 0x806;

// EtherType code for IPv6.
const ETHERTYPE_IPV6: u16 = 0x86DD;
