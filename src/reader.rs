use crate::{Error, Result};
use byteorder::{NetworkEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Forward-only read cursor over an immutable frame buffer.
///
/// Every multi-byte read is big-endian and lands in an unsigned integer.
#[derive(Debug, Clone)]
pub(crate) struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    #[inline]
    #[must_use]
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    /// Offset of the next byte to be read.
    #[inline]
    #[must_use]
    pub(crate) fn position(&self) -> usize {
        // The position never exceeds the slice length, which is a usize.
        #[allow(clippy::cast_possible_truncation)]
        let pos = self.cursor.position() as usize;
        pos
    }

    /// Number of bytes left after the cursor.
    #[inline]
    #[must_use]
    pub(crate) fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    /// Move the cursor back to `pos`, which must have been returned by
    /// [`Reader::position`] earlier.
    #[inline]
    pub(crate) fn rewind_to(&mut self, pos: usize) {
        self.cursor.set_position(pos as u64);
    }

    /// Fail unless at least `needed` bytes remain for `header`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedInput`] when the buffer is too short.
    #[inline]
    pub(crate) fn require(&self, header: &'static str, needed: usize) -> Result<()> {
        let available = self.remaining();
        if available < needed {
            return Err(truncated(header, needed, available));
        }
        Ok(())
    }

    pub(crate) fn u8(&mut self, header: &'static str) -> Result<u8> {
        let available = self.remaining();
        self.cursor
            .read_u8()
            .map_err(|_| truncated(header, 1, available))
    }

    pub(crate) fn u16(&mut self, header: &'static str) -> Result<u16> {
        let available = self.remaining();
        self.cursor
            .read_u16::<NetworkEndian>()
            .map_err(|_| truncated(header, 2, available))
    }

    pub(crate) fn u32(&mut self, header: &'static str) -> Result<u32> {
        let available = self.remaining();
        self.cursor
            .read_u32::<NetworkEndian>()
            .map_err(|_| truncated(header, 4, available))
    }

    pub(crate) fn array<const N: usize>(&mut self, header: &'static str) -> Result<[u8; N]> {
        let available = self.remaining();
        let mut buf = [0; N];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| truncated(header, N, available))?;
        Ok(buf)
    }

    /// Copy out up to `max` bytes from the cursor, fewer when the buffer ends
    /// first.
    pub(crate) fn sample(&mut self, max: usize) -> Vec<u8> {
        let start = self.position();
        let len = max.min(self.remaining());
        let bytes = self.cursor.get_ref()[start..start + len].to_vec();
        self.rewind_to(start + len);
        bytes
    }
}

fn truncated(header: &'static str, needed: usize, available: usize) -> Error {
    Error::TruncatedInput {
        header,
        needed,
        available,
    }
}

/// Maximum number of bytes captured for a transport payload dump.
pub const SAMPLE_LEN: usize = 64;
