use crate::{
    checksum::verify_ipv4_checksum,
    error::{Error, Result},
    headers::{
        EthernetHeader, Ipv4Header, UdpHeader, ETHERNET_HEADER_LEN, ETHER_TYPE_IPV4,
        IPV4_HEADER_LEN, IPV4_PROTOCOL_UDP, UDP_HEADER_LEN,
    },
};

/// Maximum number of bytes a frame buffer can hold
pub const FRAME_CAPACITY: usize = 1024;

/// Combined size of the Ethernet, IPv4, and UDP headers
pub const HEADERS_LEN: usize = ETHERNET_HEADER_LEN + IPV4_HEADER_LEN + UDP_HEADER_LEN;

const IPV4_OFFSET: usize = ETHERNET_HEADER_LEN;
const UDP_OFFSET: usize = ETHERNET_HEADER_LEN + IPV4_HEADER_LEN;

// Every typed header accessor below relies on this
const _: () = assert!(FRAME_CAPACITY >= HEADERS_LEN);

/// A known-good loopback frame: `127.0.0.1:58242 -> 127.0.0.1:8080` carrying `"Hello, UDP Server!"`
pub const DEFAULT_TEMPLATE: [u8; 60] = [
    // Ethernet: zeroed MACs, IPv4 EtherType
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x00,
    // IPv4
    0x45, 0x00, 0x00, 0x2e, 0x7c, 0xbc, 0x40, 0x00, 0x40, 0x11, 0xc0, 0x00, 0x7f, 0x00, 0x00, 0x01,
    0x7f, 0x00, 0x00, 0x01,
    // UDP
    0xe3, 0x82, 0x1f, 0x90, 0x00, 0x1a, 0xfe, 0x2d,
    // Payload
    0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x2c, 0x20, 0x55, 0x44, 0x50, 0x20, 0x53, 0x65, 0x72, 0x76, 0x65,
    0x72, 0x21,
];

/// A fixed-capacity buffer holding one Ethernet + IPv4 + UDP frame.
///
/// Headers are accessed as views over regions of the buffer. The buffer never grows; the
/// number of bytes that make up the frame is derived from the IPv4 total length field.
#[derive(Clone)]
pub struct Frame {
    buffer: [u8; FRAME_CAPACITY],
}

impl Frame {
    /// Seeds a new frame from `template`. The rest of the buffer is zeroed.
    pub fn from_template(template: &[u8]) -> Result<Self> {
        if template.len() > FRAME_CAPACITY {
            return Err(Error::TemplateTooLarge {
                actual: template.len(),
                capacity: FRAME_CAPACITY,
            });
        }
        if template.len() < HEADERS_LEN {
            return Err(Error::TemplateTooShort {
                expected: HEADERS_LEN,
                actual: template.len(),
            });
        }

        let mut buffer = [0u8; FRAME_CAPACITY];
        buffer[..template.len()].copy_from_slice(template);
        log::trace!("Seeded frame from a {} byte template", template.len());
        Ok(Self { buffer })
    }

    /// Read access to `size` bytes starting at `offset`
    pub fn overlay(&self, offset: usize, size: usize) -> Result<&[u8]> {
        let end = Self::overlay_end(offset, size)?;
        Ok(&self.buffer[offset..end])
    }

    /// Write access to `size` bytes starting at `offset`
    pub fn overlay_mut(&mut self, offset: usize, size: usize) -> Result<&mut [u8]> {
        let end = Self::overlay_end(offset, size)?;
        Ok(&mut self.buffer[offset..end])
    }

    fn overlay_end(offset: usize, size: usize) -> Result<usize> {
        offset
            .checked_add(size)
            .filter(|end| *end <= FRAME_CAPACITY)
            .ok_or(Error::OverlayOutOfBounds {
                offset,
                size,
                capacity: FRAME_CAPACITY,
            })
    }

    #[must_use]
    pub fn ethernet(&self) -> EthernetHeader<&[u8]> {
        EthernetHeader::new_unchecked(&self.buffer[..IPV4_OFFSET])
    }

    pub fn ethernet_mut(&mut self) -> EthernetHeader<&mut [u8]> {
        EthernetHeader::new_unchecked(&mut self.buffer[..IPV4_OFFSET])
    }

    #[must_use]
    pub fn ipv4(&self) -> Ipv4Header<&[u8]> {
        Ipv4Header::new_unchecked(&self.buffer[IPV4_OFFSET..UDP_OFFSET])
    }

    pub fn ipv4_mut(&mut self) -> Ipv4Header<&mut [u8]> {
        Ipv4Header::new_unchecked(&mut self.buffer[IPV4_OFFSET..UDP_OFFSET])
    }

    #[must_use]
    pub fn udp(&self) -> UdpHeader<&[u8]> {
        UdpHeader::new_unchecked(&self.buffer[UDP_OFFSET..HEADERS_LEN])
    }

    pub fn udp_mut(&mut self) -> UdpHeader<&mut [u8]> {
        UdpHeader::new_unchecked(&mut self.buffer[UDP_OFFSET..HEADERS_LEN])
    }

    /// Number of bytes to put on the wire.
    ///
    /// This is the IPv4 total length plus the Ethernet header, which the IPv4 length does not count.
    pub fn send_length(&self) -> Result<usize> {
        let total_length = self.ipv4().total_length();
        let length = usize::from(total_length) + ETHERNET_HEADER_LEN;
        if !(HEADERS_LEN..=FRAME_CAPACITY).contains(&length) {
            return Err(Error::InvalidTotalLength(total_length));
        }
        Ok(length)
    }

    /// The bytes following the UDP header, up to the end of the frame
    pub fn payload_region(&self) -> Result<&[u8]> {
        let end = self.send_length()?;
        self.overlay(HEADERS_LEN, end - HEADERS_LEN)
    }

    /// The whole frame as it will be sent
    pub fn as_bytes(&self) -> Result<&[u8]> {
        let end = self.send_length()?;
        self.overlay(0, end)
    }

    /// Checks that the frame is an IPv4/UDP frame with a valid IPv4 header checksum
    pub fn validate(&self) -> Result<()> {
        let ethernet = self.ethernet();
        if ethernet.ether_type() != ETHER_TYPE_IPV4 {
            return Err(Error::UnexpectedEtherType(ethernet.ether_type()));
        }

        let ipv4 = self.ipv4();
        if ipv4.version() != 4 {
            return Err(Error::UnexpectedIpVersion(ipv4.version()));
        }
        if usize::from(ipv4.header_length()) * 4 != IPV4_HEADER_LEN {
            return Err(Error::UnsupportedHeaderLength(ipv4.header_length()));
        }
        if ipv4.protocol() != IPV4_PROTOCOL_UDP {
            return Err(Error::UnexpectedProtocol(ipv4.protocol()));
        }
        self.send_length()?;
        if !verify_ipv4_checksum(ipv4.as_bytes()) {
            return Err(Error::InvalidChecksum(ipv4.checksum()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("ethernet", &self.ethernet())
            .field("ipv4", &self.ipv4())
            .field("udp", &self.udp())
            .finish_non_exhaustive()
    }
}
