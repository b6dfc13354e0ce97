//! TCP segment header decoding.
//!
//! # Standards conformance
//!
//! Follows the header layout of [RFC
//! 9293](https://www.rfc-editor.org/rfc/rfc9293.html#name-header-format).
//! Options are counted but not decoded.
use crate::{
    bitset,
    reader::{Reader, SAMPLE_LEN},
    Result,
};

/// A decoded TCP segment header plus a sample of the bytes starting at the
/// header.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Segment {
    source: u16,
    dest: u16,
    sequence: u32,
    acked: u32,
    data_offset: u8,
    flags: Flags,
    window: u16,
    checksum: [u8; 2],
    urgent: u16,
    sample: Vec<u8>,
}

impl Segment {
    /// Read the TCP header from the cursor, then rewind to the start of the
    /// header and capture up to [`SAMPLE_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Fails when fewer than [`MIN_HEADER_LEN`] bytes remain.
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        reader.require(NAME, MIN_HEADER_LEN)?;
        let start = reader.position();

        let source = reader.u16(NAME)?;
        let dest = reader.u16(NAME)?;
        let sequence = reader.u32(NAME)?;
        let acked = reader.u32(NAME)?;
        let data_offset = reader.u8(NAME)? >> 4;
        let flags = Flags::from(reader.u8(NAME)?);
        let window = reader.u16(NAME)?;
        let checksum = reader.array::<2>(NAME)?;
        let urgent = reader.u16(NAME)?;

        reader.rewind_to(start);
        let sample = reader.sample(SAMPLE_LEN);

        Ok(Self {
            source,
            dest,
            sequence,
            acked,
            data_offset,
            flags,
            window,
            checksum,
            urgent,
            sample,
        })
    }

    /// Extract the source port.
    #[inline]
    #[must_use]
    pub fn source(&self) -> u16 {
        self.source
    }

    /// Extract the destination port.
    #[inline]
    #[must_use]
    pub fn dest(&self) -> u16 {
        self.dest
    }

    /// Extract the sequence number.
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Extract the acknowledgment number.
    #[inline]
    #[must_use]
    pub fn acked(&self) -> u32 {
        self.acked
    }

    /// Extract the data offset, in 32-bit words.
    #[inline]
    #[must_use]
    pub fn data_offset(&self) -> u8 {
        self.data_offset
    }

    /// Length of the header in bytes, derived from the data offset.
    #[inline]
    #[must_use]
    pub fn header_len(&self) -> usize {
        usize::from(self.data_offset) * 4
    }

    /// Extract the control bit flags.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Extract the window size.
    #[inline]
    #[must_use]
    pub fn window(&self) -> u16 {
        self.window
    }

    /// Extract the segment checksum.
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> [u8; 2] {
        self.checksum
    }

    /// Extract the urgent pointer.
    #[inline]
    #[must_use]
    pub fn urgent(&self) -> u16 {
        self.urgent
    }

    /// The first bytes of the segment, header included.
    #[inline]
    #[must_use]
    pub fn sample(&self) -> &[u8] {
        &self.sample
    }
}

/// TCP control bit flags.
///
/// ```
/// use pktview::tcp::Flags;
///
/// let flags = Flags::from(0x12);
/// assert!(flags.ack_significant());
/// assert!(flags.synchronize());
/// assert!(!flags.finished());
/// assert_eq!(flags.bits(), 0x12);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Flags {
    cwr: bool,
    ece: bool,
    urg: bool,
    ack: bool,
    psh: bool,
    rst: bool,
    syn: bool,
    fin: bool,
}

impl Flags {
    /// Whether the congestion window reduced flag is set.
    #[inline]
    #[must_use]
    pub fn congestion_window_reduced(&self) -> bool {
        self.cwr
    }

    /// Whether the ECN echo flag is set.
    #[inline]
    #[must_use]
    pub fn ecn_echo(&self) -> bool {
        self.ece
    }

    /// Whether the urgent significant flag is set.
    #[inline]
    #[must_use]
    pub fn urgent_significant(&self) -> bool {
        self.urg
    }

    /// Whether the ack significant flag is set.
    #[inline]
    #[must_use]
    pub fn ack_significant(&self) -> bool {
        self.ack
    }

    /// Whether the push flag is set.
    #[inline]
    #[must_use]
    pub fn push(&self) -> bool {
        self.psh
    }

    /// Whether the reset connection flag is set.
    #[inline]
    #[must_use]
    pub fn reset_conn(&self) -> bool {
        self.rst
    }

    /// Whether the synchronize sequence numbers flag is set.
    #[inline]
    #[must_use]
    pub fn synchronize(&self) -> bool {
        self.syn
    }

    /// Whether the finish flag is set.
    #[inline]
    #[must_use]
    pub fn finished(&self) -> bool {
        self.fin
    }

    /// The six classic control bits, urg down to fin.
    #[inline]
    #[must_use]
    pub fn bits(&self) -> u8 {
        [self.urg, self.ack, self.psh, self.rst, self.syn, self.fin]
            .into_iter()
            .fold(0, |acc, bit| (acc << 1) | u8::from(bit))
    }
}

impl From<u8> for Flags {
    fn from(value: u8) -> Self {
        Self {
            cwr: bitset(value, 7),
            ece: bitset(value, 6),
            urg: bitset(value, 5),
            ack: bitset(value, 4),
            psh: bitset(value, 3),
            rst: bitset(value, 2),
            syn: bitset(value, 1),
            fin: bitset(value, 0),
        }
    }
}

/// Length of a TCP header without options.
pub const MIN_HEADER_LEN: usize = 20;

const NAME: &str = "tcp";
