use super::{read_u16, write_u16};

/// Size of a UDP header
pub const UDP_HEADER_LEN: usize = 8;

const SOURCE_PORT: usize = 0;
const DESTINATION_PORT: usize = 2;
const LENGTH: usize = 4;
const CHECKSUM: usize = 6;

/// A view over a UDP header
#[derive(Debug)]
pub struct UdpHeader<T> {
    buffer: T,
}

impl<T: AsRef<[u8]>> UdpHeader<T> {
    /// Wraps `buffer`, failing if it is shorter than a UDP header
    #[must_use]
    pub fn new(buffer: T) -> Option<Self> {
        (buffer.as_ref().len() >= UDP_HEADER_LEN).then_some(Self { buffer })
    }

    /// Wraps `buffer` without a length check. Callers guarantee it is long enough.
    pub(crate) fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..UDP_HEADER_LEN]
    }

    #[must_use]
    pub fn source_port(&self) -> u16 {
        read_u16(self.as_bytes(), SOURCE_PORT)
    }

    #[must_use]
    pub fn destination_port(&self) -> u16 {
        read_u16(self.as_bytes(), DESTINATION_PORT)
    }

    /// Length of the UDP header plus payload
    #[must_use]
    pub fn length(&self) -> u16 {
        read_u16(self.as_bytes(), LENGTH)
    }

    #[must_use]
    pub fn checksum(&self) -> u16 {
        read_u16(self.as_bytes(), CHECKSUM)
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> UdpHeader<T> {
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[..UDP_HEADER_LEN]
    }

    pub fn set_source_port(&mut self, port: u16) {
        write_u16(self.bytes_mut(), SOURCE_PORT, port);
    }

    pub fn set_destination_port(&mut self, port: u16) {
        write_u16(self.bytes_mut(), DESTINATION_PORT, port);
    }

    pub fn set_length(&mut self, length: u16) {
        write_u16(self.bytes_mut(), LENGTH, length);
    }

    pub fn set_checksum(&mut self, checksum: u16) {
        write_u16(self.bytes_mut(), CHECKSUM, checksum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fields() {
        let bytes = [0xe3, 0x82, 0x1f, 0x90, 0x00, 0x1a, 0xfe, 0x2d];
        let header = UdpHeader::new(&bytes[..]).unwrap();
        assert_eq!(header.source_port(), 58242);
        assert_eq!(header.destination_port(), 8080);
        assert_eq!(header.length(), 26);
        assert_eq!(header.checksum(), 0xfe2d);
    }

    #[test]
    fn test_view_ignores_trailing_payload() {
        let mut bytes = [0u8; 12];
        let mut header = UdpHeader::new(&mut bytes[..]).unwrap();
        header.set_checksum(0xffff);
        assert_eq!(header.as_bytes().len(), UDP_HEADER_LEN);
        assert_eq!(&bytes[8..], &[0u8; 4]);
    }
}
