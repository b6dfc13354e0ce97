//! ICMP header decoding.
//!
//! Only the common 4-byte header is decoded. The rest of the message depends
//! on the type and is left alone.
use crate::{reader::Reader, Result};

/// A decoded ICMP header.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Header {
    typ: u8,
    code: u8,
    checksum: [u8; 2],
}

impl Header {
    /// Read the ICMP header from the cursor.
    ///
    /// # Errors
    ///
    /// Fails when fewer than [`HEADER_LEN`] bytes remain.
    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        reader.require(NAME, HEADER_LEN)?;
        Ok(Self {
            typ: reader.u8(NAME)?,
            code: reader.u8(NAME)?,
            checksum: reader.array::<2>(NAME)?,
        })
    }

    /// Extract the "type" header field.
    #[inline]
    #[must_use]
    pub fn typ(&self) -> u8 {
        self.typ
    }

    /// Extract the "code" header field.
    #[inline]
    #[must_use]
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Extract the header checksum.
    #[inline]
    #[must_use]
    pub fn checksum(&self) -> [u8; 2] {
        self.checksum
    }

    /// Human readable name of the message type.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.typ {
            0 => "echo reply",
            3 => "destination unreachable",
            4 => "source quench",
            5 => "redirect",
            8 => "echo request",
            9 => "router advertisement",
            10 => "router solicitation",
            11 => "time exceeded",
            12 => "parameter problem",
            13 => "timestamp",
            14 => "timestamp reply",
            _ => "unknown",
        }
    }
}

/// Size of the ICMP header.
pub const HEADER_LEN: usize = 4;

const NAME: &str = "icmp";
