//! Decode a single captured Ethernet frame and render it as an annotated,
//! snoop-style text report.
//!
//! ## Decoding
//!
//! [`decode`] walks a read cursor over the raw frame bytes once, copying each
//! header field out as it goes. The Ethernet header is mandatory. The IPv4
//! header is only decoded when the ethertype says so, and the transport
//! header is chosen by the IP protocol number:
//!
//! * ICMP (1) and TCP (6) and UDP (17) are decoded.
//! * Any other protocol number is kept as [`Transport::Unknown`].
//!
//! Running out of bytes part way through a header is the only failure, and
//! is reported as [`Error::TruncatedInput`]. Frames that simply carry
//! something this crate doesn't understand still decode to a [`Frame`] that
//! can be rendered.
//!
//! ## Rendering
//!
//! [`render`] turns a decoded [`Frame`] into report lines. It's a pure
//! function of the frame, so rendering the same frame twice always gives the
//! same lines.
//!
//! ```
//! let mut bytes = vec![0xff; 12];
//! bytes.extend_from_slice(&[0x08, 0x06]);
//!
//! let frame = pktview::decode(&bytes).unwrap();
//! let lines = pktview::render(&frame);
//! assert_eq!(lines[0], "ETHER:  ----- Ether Header -----");
//! ```
#![warn(clippy::pedantic)]
#![allow(clippy::len_without_is_empty)]

pub mod enet;
pub mod frame;
pub mod icmp;
pub mod ipv4;
pub mod render;
pub mod tcp;
pub mod udp;

mod reader;

pub use frame::{decode, Frame, Transport};
pub use reader::SAMPLE_LEN;
pub use render::{render, write_report};

/// Utility wrapper for decoding results.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when decoding or reporting a frame.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("truncated input: {header} header needs {needed} bytes, {available} available")]
    TruncatedInput {
        header: &'static str,
        needed: usize,
        available: usize,
    },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

// Check if the nth bit is set
#[inline]
#[must_use]
pub(crate) fn bitset(byte: u8, n: usize) -> bool {
    byte & (1 << n) != 0
}
