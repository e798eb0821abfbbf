use std::net::Ipv4Addr;

use super::{read_u16, write_u16};

/// Size of an IPv4 header without options
pub const IPV4_HEADER_LEN: usize = 20;

/// IP protocol number for UDP
pub const IPV4_PROTOCOL_UDP: u8 = 17;

const VERSION_IHL: usize = 0;
const TYPE_OF_SERVICE: usize = 1;
const TOTAL_LENGTH: usize = 2;
const IDENTIFICATION: usize = 4;
const FLAGS_FRAGMENT_OFFSET: usize = 6;
const TIME_TO_LIVE: usize = 8;
const PROTOCOL: usize = 9;
const CHECKSUM: usize = 10;
const SOURCE: usize = 12;
const DESTINATION: usize = 16;

/// A view over an option-less IPv4 header
#[derive(Debug)]
pub struct Ipv4Header<T> {
    buffer: T,
}

impl<T: AsRef<[u8]>> Ipv4Header<T> {
    /// Wraps `buffer`, failing if it is shorter than an IPv4 header
    #[must_use]
    pub fn new(buffer: T) -> Option<Self> {
        (buffer.as_ref().len() >= IPV4_HEADER_LEN).then_some(Self { buffer })
    }

    /// Wraps `buffer` without a length check. Callers guarantee it is long enough.
    pub(crate) fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// The header's bytes, exactly `IPV4_HEADER_LEN` long
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..IPV4_HEADER_LEN]
    }

    /// High nibble of the first byte
    #[must_use]
    pub fn version(&self) -> u8 {
        self.as_bytes()[VERSION_IHL] >> 4
    }

    /// Header length in 32-bit words (low nibble of the first byte)
    #[must_use]
    pub fn header_length(&self) -> u8 {
        self.as_bytes()[VERSION_IHL] & 0x0f
    }

    #[must_use]
    pub fn type_of_service(&self) -> u8 {
        self.as_bytes()[TYPE_OF_SERVICE]
    }

    /// Length of the IPv4 header plus payload. Does not count the Ethernet header.
    #[must_use]
    pub fn total_length(&self) -> u16 {
        read_u16(self.as_bytes(), TOTAL_LENGTH)
    }

    #[must_use]
    pub fn identification(&self) -> u16 {
        read_u16(self.as_bytes(), IDENTIFICATION)
    }

    #[must_use]
    pub fn flags_fragment_offset(&self) -> u16 {
        read_u16(self.as_bytes(), FLAGS_FRAGMENT_OFFSET)
    }

    #[must_use]
    pub fn time_to_live(&self) -> u8 {
        self.as_bytes()[TIME_TO_LIVE]
    }

    #[must_use]
    pub fn protocol(&self) -> u8 {
        self.as_bytes()[PROTOCOL]
    }

    #[must_use]
    pub fn checksum(&self) -> u16 {
        read_u16(self.as_bytes(), CHECKSUM)
    }

    #[must_use]
    pub fn source(&self) -> Ipv4Addr {
        let bytes = self.as_bytes();
        Ipv4Addr::new(
            bytes[SOURCE],
            bytes[SOURCE + 1],
            bytes[SOURCE + 2],
            bytes[SOURCE + 3],
        )
    }

    #[must_use]
    pub fn destination(&self) -> Ipv4Addr {
        let bytes = self.as_bytes();
        Ipv4Addr::new(
            bytes[DESTINATION],
            bytes[DESTINATION + 1],
            bytes[DESTINATION + 2],
            bytes[DESTINATION + 3],
        )
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Ipv4Header<T> {
    /// The header's bytes for in-place editing
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[..IPV4_HEADER_LEN]
    }

    pub fn set_version(&mut self, version: u8) {
        let byte = &mut self.as_bytes_mut()[VERSION_IHL];
        *byte = (version << 4) | (*byte & 0x0f);
    }

    pub fn set_header_length(&mut self, words: u8) {
        let byte = &mut self.as_bytes_mut()[VERSION_IHL];
        *byte = (*byte & 0xf0) | (words & 0x0f);
    }

    pub fn set_type_of_service(&mut self, type_of_service: u8) {
        self.as_bytes_mut()[TYPE_OF_SERVICE] = type_of_service;
    }

    pub fn set_total_length(&mut self, total_length: u16) {
        write_u16(self.as_bytes_mut(), TOTAL_LENGTH, total_length);
    }

    pub fn set_identification(&mut self, identification: u16) {
        write_u16(self.as_bytes_mut(), IDENTIFICATION, identification);
    }

    pub fn set_flags_fragment_offset(&mut self, value: u16) {
        write_u16(self.as_bytes_mut(), FLAGS_FRAGMENT_OFFSET, value);
    }

    pub fn set_time_to_live(&mut self, time_to_live: u8) {
        self.as_bytes_mut()[TIME_TO_LIVE] = time_to_live;
    }

    pub fn set_protocol(&mut self, protocol: u8) {
        self.as_bytes_mut()[PROTOCOL] = protocol;
    }

    pub fn set_checksum(&mut self, checksum: u16) {
        write_u16(self.as_bytes_mut(), CHECKSUM, checksum);
    }

    pub fn set_source(&mut self, address: Ipv4Addr) {
        self.as_bytes_mut()[SOURCE..SOURCE + 4].copy_from_slice(&address.octets());
    }

    pub fn set_destination(&mut self, address: Ipv4Addr) {
        self.as_bytes_mut()[DESTINATION..DESTINATION + 4].copy_from_slice(&address.octets());
    }
}
