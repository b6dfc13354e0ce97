//! IPv4 header decoding.
//!
//! ## Standards conformance
//!
//! This implementation follows the [RFC
//! 791](https://datatracker.ietf.org/doc/html/rfc791) header layout, and
//! reports the second byte with its RFC 791 type-of-service meaning.
//!
//! Options are not decoded. The header length is reported, but the transport
//! header is always read straight after the fixed 20 bytes.
use crate::{bitset, reader::Reader, Result};
use std::net::Ipv4Addr;

/// A decoded IPv4 header.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Header {
    version: u8,
    header_len: u8,
    tos: TypeOfService,
    len: u16,
    id: u16,
    flags_offset: u16,
    ttl: u8,
    protocol: Protocol,
    checksum: [u8; 2],
    source: Ipv4Addr,
    dest: Ipv4Addr,
}

impl Header {
    /// Read the fixed part of the IPv4 header from the cursor.
    ///
    /// # Errors
    ///
    /// Fails when fewer than [`MIN_HEADER_LEN`] bytes remain.
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        reader.require(NAME, MIN_HEADER_LEN)?;
        let vhl = reader.u8(NAME)?;
        let tos = TypeOfService::new(reader.u8(NAME)?);
        let len = reader.u16(NAME)?;
        let id = reader.u16(NAME)?;
        let flags_offset = reader.u16(NAME)?;
        let ttl = reader.u8(NAME)?;
        let protocol = Protocol::from(reader.u8(NAME)?);
        let checksum = reader.array::<2>(NAME)?;
        let source = Ipv4Addr::from(reader.array::<4>(NAME)?);
        let dest = Ipv4Addr::from(reader.array::<4>(NAME)?);

        Ok(Self {
            version: vhl >> 4,
            header_len: (vhl & 0xF) * 4,
            tos,
            len,
            id,
            flags_offset,
            ttl,
            protocol,
            checksum,
            source,
            dest,
        })
    }

    /// Extract the version.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Length of the header in bytes. This is different from the raw field
    /// contained in the IP packet, which reports the length in increments of
    /// [`u32`].
    #[inline]
    #[must_use]
    pub fn header_len(&self) -> u8 {
        self.header_len
    }

    /// Extract the type-of-service byte.
    #[inline]
    #[must_use]
    pub fn tos(&self) -> TypeOfService {
        self.tos
    }

    /// Extract the total length.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Extract the identification bits.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Extract the flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> Flags {
        Flags::from(self.flags_offset)
    }

    /// Extract the fragment offset, in units of 8 bytes.
    #[inline]
    #[must_use]
    pub fn fragment_offset(&self) -> u16 {
        self.flags_offset & FRAGMENT_OFFSET_MASK
    }

    /// Extract the time-to-live (TTL).
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> u8 {
        self.ttl
    }

    /// Extract the protocol.
    #[inline]
    #[must_use]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Extract the header checksum, exactly as it appeared on the wire.
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> [u8; 2] {
        self.checksum
    }

    /// Extract the source address.
    #[inline]
    #[must_use]
    pub fn source(&self) -> Ipv4Addr {
        self.source
    }

    /// Extract the destination address.
    #[inline]
    #[must_use]
    pub fn dest(&self) -> Ipv4Addr {
        self.dest
    }
}

/// Strongly typed wrapper for the type-of-service byte.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct TypeOfService {
    data: u8,
}

impl TypeOfService {
    /// Create a new [`TypeOfService`] instance.
    #[inline]
    #[must_use]
    pub fn new(data: u8) -> Self {
        Self { data }
    }

    /// The raw byte.
    #[inline]
    #[must_use]
    pub fn bits(&self) -> u8 {
        self.data
    }

    /// Whether low delay was requested.
    #[inline]
    #[must_use]
    pub fn low_delay(&self) -> bool {
        bitset(self.data, 4)
    }

    /// Whether high throughput was requested.
    #[inline]
    #[must_use]
    pub fn high_throughput(&self) -> bool {
        bitset(self.data, 3)
    }

    /// Whether high reliability was requested.
    #[inline]
    #[must_use]
    pub fn high_reliability(&self) -> bool {
        bitset(self.data, 2)
    }
}

/// The three control bits at the top of the flags/fragment-offset field.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Flags {
    reserved: bool,
    do_not_fragment: bool,
    more_fragments: bool,
}

impl Flags {
    /// Create a new [`Flags`] instance.
    #[inline]
    #[must_use]
    pub fn new(do_not_fragment: bool, more_fragments: bool) -> Self {
        Self {
            reserved: false,
            do_not_fragment,
            more_fragments,
        }
    }

    /// The reserved bit. Always zero on well-formed packets.
    #[inline]
    #[must_use]
    pub fn reserved(&self) -> bool {
        self.reserved
    }

    /// True when the packet should not be fragmented.
    #[inline]
    #[must_use]
    pub fn do_not_fragment(&self) -> bool {
        self.do_not_fragment
    }

    /// True when more fragments follow this one.
    #[inline]
    #[must_use]
    pub fn more_fragments(&self) -> bool {
        self.more_fragments
    }

    /// The three bits packed into the high nibble, as shown in the report.
    #[inline]
    #[must_use]
    pub fn nibble(&self) -> u8 {
        (u8::from(self.reserved) << 3)
            | (u8::from(self.do_not_fragment) << 2)
            | (u8::from(self.more_fragments) << 1)
    }
}

impl From<u16> for Flags {
    fn from(flags_offset: u16) -> Self {
        let [high, _] = flags_offset.to_be_bytes();
        Self {
            reserved: bitset(high, 7),
            do_not_fragment: bitset(high, 6),
            more_fragments: bitset(high, 5),
        }
    }
}

/// IP protocol numbers understood by the decoder.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Protocol {
    Icmp,
    Tcp,
    Udp,
    Unknown(u8),
}

impl Protocol {
    /// Short name used in the report.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Icmp => "ICMP",
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for Protocol {
    fn from(value: u8) -> Self {
        match value {
            PROTOCOL_ICMP => Protocol::Icmp,
            PROTOCOL_TCP => Protocol::Tcp,
            PROTOCOL_UDP => Protocol::Udp,
            _ => Protocol::Unknown(value),
        }
    }
}

impl From<Protocol> for u8 {
    fn from(value: Protocol) -> Self {
        match value {
            Protocol::Icmp => PROTOCOL_ICMP,
            Protocol::Tcp => PROTOCOL_TCP,
            Protocol::Udp => PROTOCOL_UDP,
            Protocol::Unknown(n) => n,
        }
    }
}

/// Length of an IPv4 header without options.
pub const MIN_HEADER_LEN: usize = 20;

const NAME: &str = "ipv4";

const FRAGMENT_OFFSET_MASK: u16 = 0x1FFF;

const PROTOCOL_ICMP: u8 = 1;
const PROTOCOL_TCP: u8 = 6;
const PROTOCOL_UDP: u8 = 17;

#[cfg(test)]
mod tests {
    use super::{Flags, Header, Protocol, TypeOfService};
    use crate::{reader::Reader, Error};
    use std::{error::Error as StdError, net::Ipv4Addr};

    const HEADER: [u8; 20] = [
        0x45, 0x10, 0x00, 0x48, // version, ihl, tos, total length
        0x1C, 0x46, 0x40, 0x00, // id, flags + offset
        0x40, 0x11, 0xA3, 0xED, // ttl, protocol, checksum
        0x0A, 0x00, 0x35, 0x07, // source
        0x68, 0x11, 0xEF, 0x9F, // dest
    ];

    fn header() -> Result<Header, Box<dyn StdError>> {
        Ok(Header::read(&mut Reader::new(&HEADER))?)
    }

    #[test]
    fn header_returns_err_when_byte_slice_too_short() {
        let err = Header::read(&mut Reader::new(&HEADER[..19])).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedInput {
                header: "ipv4",
                needed: 20,
                available: 19
            }
        ));
    }

    #[test]
    fn header_has_expected_version() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.version(), 4);
        Ok(())
    }

    #[test]
    fn header_has_expected_header_len() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.header_len(), 20);
        Ok(())
    }

    #[test]
    fn header_has_expected_tos() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.tos(), TypeOfService::new(0x10));
        Ok(())
    }

    #[test]
    fn header_has_expected_len() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.len(), 72);
        Ok(())
    }

    #[test]
    fn header_has_expected_id() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.id(), 0x1C46);
        Ok(())
    }

    #[test]
    fn header_has_expected_flags() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.flags(), Flags::new(true, false));
        Ok(())
    }

    #[test]
    fn header_has_expected_fragment_offset() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.fragment_offset(), 0);
        Ok(())
    }

    #[test]
    fn header_has_expected_ttl() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.ttl(), 64);
        Ok(())
    }

    #[test]
    fn header_has_expected_protocol() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.protocol(), Protocol::Udp);
        Ok(())
    }

    #[test]
    fn header_has_expected_checksum() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.checksum(), [0xA3, 0xED]);
        Ok(())
    }

    #[test]
    fn header_has_expected_source() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.source(), Ipv4Addr::new(10, 0, 53, 7));
        Ok(())
    }

    #[test]
    fn header_has_expected_dest() -> Result<(), Box<dyn StdError>> {
        assert_eq!(header()?.dest(), Ipv4Addr::new(104, 17, 239, 159));
        Ok(())
    }

    #[test]
    fn ttl_and_protocol_with_high_bit_are_unsigned() -> Result<(), Box<dyn StdError>> {
        let mut bytes = HEADER;
        bytes[8] = 0xFF;
        bytes[9] = 0xFE;
        let header = Header::read(&mut Reader::new(&bytes))?;
        assert_eq!(header.ttl(), 255);
        assert_eq!(header.protocol(), Protocol::Unknown(254));
        Ok(())
    }

    #[test]
    fn header_len_accounts_for_options_nibble() -> Result<(), Box<dyn StdError>> {
        let mut bytes = HEADER;
        bytes[0] = 0x46;
        let header = Header::read(&mut Reader::new(&bytes))?;
        assert_eq!(header.header_len(), 24);
        Ok(())
    }

    #[test]
    fn flags_decode_more_fragments_and_offset() -> Result<(), Box<dyn StdError>> {
        let mut bytes = HEADER;
        bytes[6] = 0x20;
        bytes[7] = 0xB9;
        let header = Header::read(&mut Reader::new(&bytes))?;
        assert_eq!(header.flags(), Flags::new(false, true));
        assert_eq!(header.fragment_offset(), 185);
        Ok(())
    }

    #[test]
    fn flags_reserved_bit_is_kept() {
        let flags = Flags::from(0x8000);
        assert!(flags.reserved());
        assert!(!flags.do_not_fragment());
        assert!(!flags.more_fragments());
        assert_eq!(flags.nibble(), 0x8);
    }

    #[test]
    fn flags_nibble_has_expected_value() {
        assert_eq!(Flags::new(true, false).nibble(), 0x4);
        assert_eq!(Flags::new(true, true).nibble(), 0x6);
    }

    #[test]
    fn tos_has_expected_service_bits() {
        let tos = TypeOfService::new(0b0001_0100);
        assert!(tos.low_delay());
        assert!(!tos.high_throughput());
        assert!(tos.high_reliability());
    }

    #[test]
    fn protocol_round_trips_through_number() {
        assert_eq!(Protocol::from(6), Protocol::Tcp);
        assert_eq!(u8::from(Protocol::Udp), 17);
        assert_eq!(u8::from(Protocol::Unknown(89)), 89);
    }
}
