/// All possible errors thrown by `ethframe` functions
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("Overlay of {size} bytes at offset {offset} exceeds the {capacity} byte frame")]
    OverlayOutOfBounds {
        offset: usize,
        size: usize,
        capacity: usize,
    },
    #[error("Template is {actual} bytes but the frame only holds {capacity}")]
    TemplateTooLarge { actual: usize, capacity: usize },
    #[error("Template too short. Expected at least {expected} bytes, got {actual}")]
    TemplateTooShort { expected: usize, actual: usize },
    #[error("IPv4 total length {0} does not describe a frame that fits the buffer")]
    InvalidTotalLength(u16),
    #[error("UDP length {0} does not describe a datagram that fits the buffer")]
    InvalidUdpLength(u16),
    #[error("Payload of {actual} bytes exceeds the {available} bytes left after the headers")]
    PayloadTooLarge { actual: usize, available: usize },
    #[error("Unexpected EtherType: {0:#06x}")]
    UnexpectedEtherType(u16),
    #[error("Unexpected IP version: {0}")]
    UnexpectedIpVersion(u8),
    #[error("Unsupported IPv4 header length: {0} words")]
    UnsupportedHeaderLength(u8),
    #[error("Unexpected IP protocol number: {0}")]
    UnexpectedProtocol(u8),
    #[error("IPv4 header checksum {0:#06x} does not verify")]
    InvalidChecksum(u16),
}

/// Result type for `ethframe`
pub type Result<T> = std::result::Result<T, Error>;
