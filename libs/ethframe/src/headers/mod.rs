//! Byte-exact views over Ethernet, IPv4, and UDP headers.
//!
//! Each view wraps a byte buffer (`&[u8]` for reading, `&mut [u8]` for editing) and maps
//! every field onto a fixed wire offset. Multi-byte fields are big-endian on the wire and
//! are converted explicitly in the accessors.

mod ethernet;
mod ipv4;
mod udp;

pub use ethernet::{EthernetHeader, ETHERNET_HEADER_LEN, ETHER_TYPE_IPV4};
pub use ipv4::{Ipv4Header, IPV4_HEADER_LEN, IPV4_PROTOCOL_UDP};
pub use udp::{UdpHeader, UDP_HEADER_LEN};

/// Reads a big-endian `u16` at `offset`
pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

/// Writes `value` as a big-endian `u16` at `offset`
pub(crate) fn write_u16(bytes: &mut [u8], offset: usize, value: u16) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}
