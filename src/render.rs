//! Text report rendering.
//!
//! Every line starts with the protocol tag of its section, left-aligned in a
//! fixed-width column, so the report reads as blocks even where a line is
//! otherwise empty:
//!
//! ```text
//! ETHER:  ----- Ether Header -----
//! ETHER:
//! ETHER:  Packet size = 60 bytes
//! ```
//!
//! Bit-field bytes are broken out one bit per line using a mask with the bit
//! value in its own position, e.g. `.... ..1. = Syn`.
use crate::{enet, icmp, ipv4, tcp, udp, Frame, Result, Transport};
use std::{fmt::Display, io::Write};

/// Render a decoded frame as report lines.
#[must_use]
pub fn render(frame: &Frame) -> Vec<String> {
    let mut lines = Vec::new();
    ethernet(&mut Section::new(ETHER, &mut lines), frame.ethernet(), frame.len());

    let Some(ip) = frame.ip() else {
        return lines;
    };
    ipv4(&mut Section::new(IP, &mut lines), ip);

    match frame.transport() {
        Some(Transport::Icmp(header)) => icmp(&mut Section::new(ICMP, &mut lines), header),
        Some(Transport::Tcp(segment)) => tcp(&mut Section::new(TCP, &mut lines), segment),
        Some(Transport::Udp(datagram)) => udp(&mut Section::new(UDP, &mut lines), datagram),
        Some(Transport::Unknown(protocol)) => {
            Section::new(IP, &mut lines).line(format_args!("Unknown protocol: {protocol}"));
        }
        None => {}
    }
    lines
}

/// Render a decoded frame and write each line to `sink`.
///
/// # Errors
///
/// Fails when writing to `sink` fails.
pub fn write_report<W: Write>(frame: &Frame, mut sink: W) -> Result<()> {
    for line in render(frame) {
        writeln!(sink, "{line}")?;
    }
    sink.flush()?;
    Ok(())
}

// Lines of one protocol section, all sharing the same tag.
struct Section<'a> {
    tag: &'static str,
    lines: &'a mut Vec<String>,
}

impl<'a> Section<'a> {
    fn new(tag: &'static str, lines: &'a mut Vec<String>) -> Self {
        Self { tag, lines }
    }

    fn line(&mut self, content: impl Display) {
        self.lines
            .push(format!("{:<width$}{}", self.tag, content, width = TAG_WIDTH));
    }

    fn blank(&mut self) {
        self.line("");
    }

    fn title(&mut self, name: &str) {
        self.line(format_args!("----- {name} Header -----"));
        self.blank();
    }

    fn bit(&mut self, byte: u8, n: usize, label: impl Display) {
        self.line(format_args!(
            "      {} = {label}",
            bit_mask(n, crate::bitset(byte, n))
        ));
    }

    fn dump(&mut self, data: &[u8]) {
        self.line(format_args!("Data: (first {} bytes)", data.len()));
        for row in data.chunks(ROW_LEN) {
            self.line(dump_row(row));
        }
    }
}

fn ethernet(section: &mut Section<'_>, header: &enet::Header, len: usize) {
    let ethertype = header.ethertype();
    section.title("Ether");
    section.line(format_args!("Packet size = {len} bytes"));
    section.line(format_args!("Destination = {},", header.dest()));
    section.line(format_args!("Source      = {},", header.source()));
    section.line(format_args!(
        "Ethertype   = {:04x} ({})",
        u16::from(ethertype),
        ethertype.label()
    ));
    section.blank();
}

fn ipv4(section: &mut Section<'_>, header: &ipv4::Header) {
    let tos = header.tos().bits();
    let flags = header.flags();
    // High byte of the flags/offset field with the offset bits cleared.
    let flags_high = flags.nibble() << 4;

    section.title("IP");
    section.line(format_args!("Version = {}", header.version()));
    section.line(format_args!("Header Length = {} bytes", header.header_len()));
    section.line(format_args!("Type of service = 0x{tos:02x}"));
    section.line("      xxx. .... = 0 (precedence)");
    section.bit(tos, 4, service(header.tos().low_delay(), "minimize", "delay"));
    section.bit(tos, 3, service(header.tos().high_throughput(), "maximize", "throughput"));
    section.bit(tos, 2, service(header.tos().high_reliability(), "maximize", "reliability"));
    section.line(format_args!("Total length = {} bytes", header.len()));
    section.line(format_args!("Identification = {}", header.id()));
    section.line(format_args!("Flags = 0x{:02x}", flags.nibble()));
    section.bit(
        flags_high,
        6,
        if flags.do_not_fragment() {
            "do not fragment"
        } else {
            "OK to fragment"
        },
    );
    section.bit(
        flags_high,
        5,
        if flags.more_fragments() {
            "more fragments"
        } else {
            "last fragment"
        },
    );
    section.line(format_args!(
        "Fragment offset = {} bytes",
        u32::from(header.fragment_offset()) * 8
    ));
    section.line(format_args!("Time to live = {} seconds/hops", header.ttl()));
    section.line(format_args!(
        "Protocol = {} ({})",
        u8::from(header.protocol()),
        header.protocol().label()
    ));
    section.line(format_args!("Header checksum = {}", hex(&header.checksum())));
    section.line(format_args!("Source address = {}", header.source()));
    section.line(format_args!("Destination address = {}", header.dest()));
    section.line("No options");
    section.blank();
}

fn icmp(section: &mut Section<'_>, header: &icmp::Header) {
    section.title("ICMP");
    section.line(format_args!("Type = {} ({})", header.typ(), header.type_name()));
    section.line(format_args!("Code = {}", header.code()));
    section.line(format_args!("Checksum = {}", hex(&header.checksum())));
    section.blank();
}

fn tcp(section: &mut Section<'_>, segment: &tcp::Segment) {
    let flags = segment.flags().bits();

    section.title("TCP");
    section.line(format_args!("Source port = {}", segment.source()));
    section.line(format_args!("Destination port = {}", segment.dest()));
    section.line(format_args!("Sequence number = {}", segment.sequence()));
    section.line(format_args!("Acknowledgement number = {}", segment.acked()));
    section.line(format_args!("Data offset = {} bytes", segment.header_len()));
    section.line(format_args!("Flags = 0x{flags:02x}"));
    for (n, name) in TCP_FLAGS.iter().enumerate() {
        let bit = 5 - n;
        section.bit(flags, bit, feature(crate::bitset(flags, bit), name));
    }
    section.line(format_args!("Window = {}", segment.window()));
    section.line(format_args!("Checksum = {}", hex(&segment.checksum())));
    section.line(format_args!("Urgent Pointer = {}", segment.urgent()));
    match segment.header_len().checked_sub(tcp::MIN_HEADER_LEN) {
        Some(options) if options > 0 => section.line(format_args!("Options = {options} bytes")),
        _ => section.line("No options"),
    }
    section.blank();
    section.dump(segment.sample());
}

fn udp(section: &mut Section<'_>, datagram: &udp::Datagram) {
    section.title("UDP");
    section.line(format_args!("Source port = {}", datagram.source()));
    section.line(format_args!("Destination port = {}", datagram.dest()));
    section.line(format_args!("Length = {}", datagram.len()));
    section.line(format_args!("Checksum = {}", hex(&datagram.checksum())));
    section.blank();
    section.dump(datagram.sample());
}

// Mask of one byte with bit 7 on the left, e.g. "..1. ...." for bit 5 set.
fn bit_mask(n: usize, set: bool) -> String {
    let mut mask = String::with_capacity(9);
    for pos in (0..8).rev() {
        if pos == 3 {
            mask.push(' ');
        }
        mask.push(match (pos == n, set) {
            (true, true) => '1',
            (true, false) => '0',
            (false, _) => '.',
        });
    }
    mask
}

fn service(set: bool, preferred: &str, name: &str) -> String {
    format!("{} {name}", if set { preferred } else { "normal" })
}

fn feature(set: bool, name: &str) -> String {
    if set {
        name.to_string()
    } else {
        format!("No {name}")
    }
}

// Raw bytes in wire order, e.g. "0xa3ed".
fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::from("0x"), |acc, b| acc + &format!("{b:02x}"))
}

fn dump_row(row: &[u8]) -> String {
    let mut line = String::with_capacity(ROW_LEN * 3 + 10);
    for col in 0..ROW_LEN {
        match row.get(col) {
            Some(b) => line.push_str(&format!("{b:02x}")),
            None => line.push_str("  "),
        }
        if col % 2 == 1 {
            line.push(' ');
        }
    }

    let ascii: String = row
        .iter()
        .map(|&b| printable(b))
        .chain(std::iter::repeat('.').take(ROW_LEN - row.len()))
        .collect();
    line.push_str(&format!("       '{ascii}'"));
    line
}

fn printable(b: u8) -> char {
    if b.is_ascii_graphic() || b == b' ' {
        char::from(b)
    } else {
        '.'
    }
}

const TAG_WIDTH: usize = 8;
const ROW_LEN: usize = 16;

const ETHER: &str = "ETHER:";
const IP: &str = "IP:";
const ICMP: &str = "ICMP:";
const TCP: &str = "TCP:";
const UDP: &str = "UDP:";

// Flag names from bit 5 down to bit 0.
const TCP_FLAGS: [&str; 6] = ["Urgent Pointer", "Acknowledgement", "Push", "Reset", "Syn", "Fin"];
