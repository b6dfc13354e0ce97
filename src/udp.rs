//! UDP datagram header decoding.
//!
//! ## Standards conformance
//!
//! Follows [RFC 768](https://www.ietf.org/rfc/rfc768.txt).
use crate::{
    reader::{Reader, SAMPLE_LEN},
    Result,
};

/// A decoded UDP header plus a sample of the bytes starting at the header.
///
/// See the module documentation for more information.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Datagram {
    source: u16,
    dest: u16,
    len: u16,
    checksum: [u8; 2],
    sample: Vec<u8>,
}

impl Datagram {
    /// Read the UDP header from the cursor, then rewind to the start of the
    /// header and capture up to [`SAMPLE_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Fails when fewer than [`HEADER_LEN`] bytes remain.
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        reader.require(NAME, HEADER_LEN)?;
        let start = reader.position();

        let source = reader.u16(NAME)?;
        let dest = reader.u16(NAME)?;
        let len = reader.u16(NAME)?;
        let checksum = reader.array::<2>(NAME)?;

        reader.rewind_to(start);
        let sample = reader.sample(SAMPLE_LEN);

        Ok(Self {
            source,
            dest,
            len,
            checksum,
            sample,
        })
    }

    /// Get the source port.
    #[inline]
    #[must_use]
    pub fn source(&self) -> u16 {
        self.source
    }

    /// Get the destination port.
    #[inline]
    #[must_use]
    pub fn dest(&self) -> u16 {
        self.dest
    }

    /// Get the length field, which covers the header and the payload.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Get the checksum.
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> [u8; 2] {
        self.checksum
    }

    /// The first bytes of the datagram, header included.
    #[inline]
    #[must_use]
    pub fn sample(&self) -> &[u8] {
        &self.sample
    }
}

/// Size of the UDP header.
pub const HEADER_LEN: usize = 8;

const NAME: &str = "udp";
