use super::{read_u16, write_u16};

/// Size of an untagged Ethernet II header
pub const ETHERNET_HEADER_LEN: usize = 14;

/// EtherType for an IPv4 payload
pub const ETHER_TYPE_IPV4: u16 = 0x0800;

const DESTINATION: usize = 0;
const SOURCE: usize = 6;
const ETHER_TYPE: usize = 12;

/// A view over an Ethernet II header
#[derive(Debug)]
pub struct EthernetHeader<T> {
    buffer: T,
}

impl<T: AsRef<[u8]>> EthernetHeader<T> {
    /// Wraps `buffer`, failing if it is shorter than an Ethernet header
    #[must_use]
    pub fn new(buffer: T) -> Option<Self> {
        (buffer.as_ref().len() >= ETHERNET_HEADER_LEN).then_some(Self { buffer })
    }

    /// Wraps `buffer` without a length check. Callers guarantee it is long enough.
    pub(crate) fn new_unchecked(buffer: T) -> Self {
        Self { buffer }
    }

    /// The header's bytes, exactly `ETHERNET_HEADER_LEN` long
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer.as_ref()[..ETHERNET_HEADER_LEN]
    }

    #[must_use]
    pub fn destination(&self) -> [u8; 6] {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.as_bytes()[DESTINATION..DESTINATION + 6]);
        mac
    }

    #[must_use]
    pub fn source(&self) -> [u8; 6] {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.as_bytes()[SOURCE..SOURCE + 6]);
        mac
    }

    #[must_use]
    pub fn ether_type(&self) -> u16 {
        read_u16(self.as_bytes(), ETHER_TYPE)
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> EthernetHeader<T> {
    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[..ETHERNET_HEADER_LEN]
    }

    pub fn set_destination(&mut self, mac: [u8; 6]) {
        self.bytes_mut()[DESTINATION..DESTINATION + 6].copy_from_slice(&mac);
    }

    pub fn set_source(&mut self, mac: [u8; 6]) {
        self.bytes_mut()[SOURCE..SOURCE + 6].copy_from_slice(&mac);
    }

    pub fn set_ether_type(&mut self, ether_type: u16) {
        write_u16(self.bytes_mut(), ETHER_TYPE, ether_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        assert!(EthernetHeader::new(&[0u8; 13][..]).is_none());
    }

    #[test]
    fn test_field_offsets() {
        let mut buffer = [0u8; ETHERNET_HEADER_LEN];
        let mut header = EthernetHeader::new(&mut buffer[..]).unwrap();
        header.set_destination([0xff; 6]);
        header.set_source([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
        header.set_ether_type(ETHER_TYPE_IPV4);

        assert_eq!(
            buffer,
            [
                0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00
            ]
        );
    }
}
