//! In-place edits to a [`Frame`].
//!
//! Every edit that touches the IPv4 header finishes by repairing the IPv4 header checksum,
//! so the frame is sendable again once the function returns. The UDP checksum is left alone
//! unless [`recalculate_udp_checksum`] is called explicitly.

use std::net::Ipv4Addr;

use pnet_packet::udp::{self, MutableUdpPacket};

use crate::{
    checksum::compute_ipv4_checksum,
    error::{Error, Result},
    headers::{ETHERNET_HEADER_LEN, IPV4_HEADER_LEN, UDP_HEADER_LEN},
    Frame, FRAME_CAPACITY, HEADERS_LEN,
};

/// Zeroes the IPv4 checksum field, recomputes it over the 20-byte header, and writes it back
pub fn repair_ipv4_checksum(frame: &mut Frame) {
    let mut ipv4 = frame.ipv4_mut();
    ipv4.set_checksum(0);
    let checksum = compute_ipv4_checksum(ipv4.as_bytes());
    ipv4.set_checksum(checksum);
    log::trace!("Repaired IPv4 header checksum: {:#06x}", checksum);
}

/// Replaces the IPv4 source address
pub fn set_source_address(frame: &mut Frame, address: Ipv4Addr) {
    log::debug!("Setting source address to {}", address);
    frame.ipv4_mut().set_source(address);
    repair_ipv4_checksum(frame);
}

/// Replaces the IPv4 destination address
pub fn set_destination_address(frame: &mut Frame, address: Ipv4Addr) {
    log::debug!("Setting destination address to {}", address);
    frame.ipv4_mut().set_destination(address);
    repair_ipv4_checksum(frame);
}

/// Replaces the UDP source and destination ports.
///
/// Ports live outside the IPv4 header, so its checksum is still valid afterwards.
pub fn set_ports(frame: &mut Frame, source: u16, destination: u16) {
    log::debug!("Setting UDP ports to {} -> {}", source, destination);
    let mut udp = frame.udp_mut();
    udp.set_source_port(source);
    udp.set_destination_port(destination);
}

/// Replaces the UDP payload and updates both the UDP length and the IPv4 total length to match
#[allow(clippy::cast_possible_truncation)]
pub fn set_payload(frame: &mut Frame, payload: &[u8]) -> Result<()> {
    let available = FRAME_CAPACITY - HEADERS_LEN;
    if payload.len() > available {
        return Err(Error::PayloadTooLarge {
            actual: payload.len(),
            available,
        });
    }
    log::debug!("Setting a {} byte payload", payload.len());

    // Clear whatever the previous payload left behind before writing the new one
    frame.overlay_mut(HEADERS_LEN, available)?.fill(0);
    frame
        .overlay_mut(HEADERS_LEN, payload.len())?
        .copy_from_slice(payload);

    // Both lengths fit in a u16 since the frame capacity does
    frame
        .udp_mut()
        .set_length((UDP_HEADER_LEN + payload.len()) as u16);
    frame
        .ipv4_mut()
        .set_total_length((IPV4_HEADER_LEN + UDP_HEADER_LEN + payload.len()) as u16);
    repair_ipv4_checksum(frame);
    Ok(())
}

/// Recomputes the UDP checksum over the IPv4 pseudo-header, UDP header, and payload.
///
/// This is opt-in. Nothing else in this module keeps the UDP checksum in sync.
pub fn recalculate_udp_checksum(frame: &mut Frame) -> Result<u16> {
    let length = frame.udp().length();
    let segment_len = usize::from(length);
    if segment_len < UDP_HEADER_LEN
        || segment_len > frame.send_length()? - ETHERNET_HEADER_LEN - IPV4_HEADER_LEN
    {
        return Err(Error::InvalidUdpLength(length));
    }

    let (source, destination) = (frame.ipv4().source(), frame.ipv4().destination());
    let segment = frame.overlay_mut(ETHERNET_HEADER_LEN + IPV4_HEADER_LEN, segment_len)?;
    let mut udp_packet = MutableUdpPacket::new(segment).ok_or(Error::InvalidUdpLength(length))?;

    // A computed zero goes on the wire as all ones, since zero means "no checksum"
    udp_packet.set_checksum(0);
    let checksum = match udp::ipv4_checksum(&udp_packet.to_immutable(), &source, &destination) {
        0 => 0xffff,
        checksum => checksum,
    };
    udp_packet.set_checksum(checksum);
    log::trace!("Recalculated UDP checksum: {:#06x}", checksum);
    Ok(checksum)
}
