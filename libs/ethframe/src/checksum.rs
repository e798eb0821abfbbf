//! Internet checksum (RFC 1071) routines used to keep headers sendable.

/// Adds every 16-bit big-endian word of `data` into a 64-bit accumulator.
///
/// An odd trailing byte is treated as the high byte of a zero-padded word.
fn sum_words(data: &[u8]) -> u64 {
    let mut chunks = data.chunks_exact(2);
    let mut sum: u64 = chunks
        .by_ref()
        .map(|chunk| u64::from(u16::from_be_bytes([chunk[0], chunk[1]])))
        .sum();
    if let [last_byte] = chunks.remainder() {
        sum += u64::from(*last_byte) << 8;
    }
    sum
}

/// Folds carries above bit 15 back into the low 16 bits until none remain
#[allow(clippy::cast_possible_truncation)]
fn fold(mut sum: u64) -> u16 {
    while (sum >> 16) > 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    sum as u16
}

/// Computes the IPv4 header checksum over `header_bytes`.
///
/// The caller must zero the checksum field before calling this. The function
/// has no idea where that field lives and simply checksums every byte it is
/// given. The returned value is in host order; write it with `to_be_bytes`.
#[must_use]
#[profiling::function]
pub fn compute_ipv4_checksum(header_bytes: &[u8]) -> u16 {
    !fold(sum_words(header_bytes))
}

/// Checks a complete IPv4 header (checksum field included).
///
/// A header with a correct checksum sums to `0xffff`, so its complement is zero.
#[must_use]
pub fn verify_ipv4_checksum(header_bytes: &[u8]) -> bool {
    compute_ipv4_checksum(header_bytes) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The IPv4 header from the default template with its checksum field zeroed
    const TEMPLATE_HEADER: [u8; 20] = [
        0x45, 0x00, 0x00, 0x2e, 0x7c, 0xbc, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0x7f, 0x00, 0x00,
        0x01, 0x7f, 0x00, 0x00, 0x01,
    ];

    #[test]
    fn test_all_zero_header() {
        assert_eq!(compute_ipv4_checksum(&[0u8; 20]), 0xffff);
    }

    #[test]
    fn test_template_header() {
        assert_eq!(compute_ipv4_checksum(&TEMPLATE_HEADER), 0xc000);
    }

    #[test]
    fn test_verification_identity() {
        let mut header = TEMPLATE_HEADER;
        let checksum = compute_ipv4_checksum(&header);
        header[10..12].copy_from_slice(&checksum.to_be_bytes());

        assert_eq!(fold(sum_words(&header)), 0xffff);
        assert!(verify_ipv4_checksum(&header));
    }

    #[test]
    fn test_verification_rejects_stale_checksum() {
        let mut header = TEMPLATE_HEADER;
        header[10..12].copy_from_slice(&0xc000u16.to_be_bytes());
        assert!(verify_ipv4_checksum(&header));

        // Change the source address without repairing
        header[15] = 0x02;
        assert!(!verify_ipv4_checksum(&header));
    }

    #[test]
    fn test_idempotent() {
        let first = compute_ipv4_checksum(&TEMPLATE_HEADER);
        let second = compute_ipv4_checksum(&TEMPLATE_HEADER);
        assert_eq!(first, second);
    }

    #[test]
    fn test_odd_length() {
        // 0x0102 + 0x0304 + ... + 0x1112 + 0x1300 = 0x645a, complement is 0x9ba5
        let data: Vec<u8> = (1..=19).collect();
        assert_eq!(compute_ipv4_checksum(&data), 0x9ba5);
    }

    #[test]
    fn test_carry_folding() {
        // 0xffff + 0x0001 overflows into bit 16 and must wrap back around
        assert_eq!(compute_ipv4_checksum(&[0xff, 0xff, 0x00, 0x01]), 0xfffe);
    }

    #[test]
    fn test_matches_pnet() {
        let mut header = TEMPLATE_HEADER;
        header[12..16].copy_from_slice(&[192, 0, 2, 55]);
        header[16..20].copy_from_slice(&[198, 51, 100, 7]);

        let packet = pnet_packet::ipv4::Ipv4Packet::new(&header).unwrap();
        assert_eq!(
            compute_ipv4_checksum(&header),
            pnet_packet::ipv4::checksum(&packet)
        );
    }

    #[test]
    fn test_long_input_does_not_overflow() {
        // 70 000 words of 0xffff sum to a multiple of 0xffff, which folds to 0xffff
        assert_eq!(compute_ipv4_checksum(&vec![0xffu8; 140_000]), 0x0000);

        // A trailing odd byte adds 0xff00 on top
        assert_eq!(compute_ipv4_checksum(&vec![0xffu8; 140_001]), 0x00ff);
    }
}
