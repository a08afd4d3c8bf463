// Header wire layout: bit-exact bytes, version gate, depth registry.

#[cfg(test)]
mod tests {

use stegcrypt_core::{
    constants::{HEADER_LEN, HEADER_VERSION},
    headers::{decode_header_be, encode_header_be, BitDepth, HeaderError, StegoHeader},
    types::ErrorKind,
};

// ## 1️⃣ Layout

    #[test]
    fn encodes_bit_exact_layout() {
        let h = StegoHeader::new(BitDepth::Two, 0x0102_0304);
        let bytes = encode_header_be(&h);
        assert_eq!(bytes, [HEADER_VERSION, 2, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(bytes.len(), HEADER_LEN);
    }

    #[test]
    fn decode_reads_back_fields() {
        let h = decode_header_be(&[0x01, 3, 0, 0, 0, 16]).unwrap();
        assert_eq!(h.version, HEADER_VERSION);
        assert_eq!(h.bits_per_channel, 3);
        assert_eq!(h.payload_len, 16);
        assert_eq!(h.payload_bits(), 128);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let h = decode_header_be(&[0x01, 1, 0, 0, 1, 0, 0xAA, 0xBB]).unwrap();
        assert_eq!(h.payload_len, 256);
    }

    #[test]
    fn header_depth_byte_is_reported_raw() {
        // The scanner trusts the probed depth, not this byte.
        let h = decode_header_be(&[0x01, 9, 0, 0, 0, 1]).unwrap();
        assert_eq!(h.bits_per_channel, 9);
    }

// ## 2️⃣ Rejections

    #[test]
    fn short_buffer_rejected() {
        let err = decode_header_be(&[0x01, 1, 0]).unwrap_err();
        assert!(matches!(err, HeaderError::BufferTooShort { have: 3, need: 6 }));
    }

    #[test]
    fn wrong_version_rejected() {
        let err = decode_header_be(&[0x02, 1, 0, 0, 0, 1]).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidVersion { have: 0x02, need: 0x01 }));
        assert_eq!(err.kind(), ErrorKind::NoPayloadFound);
    }

// ## 3️⃣ Depth registry

    #[test]
    fn depth_accepts_one_to_four() {
        for raw in 1..=4u8 {
            let d = BitDepth::from_bits(raw).unwrap();
            assert_eq!(d.bits(), raw);
            assert_eq!(d.low_mask().count_ones(), raw as u32);
            assert_eq!(d.low_mask() | d.keep_mask(), 0xFF);
        }
    }

    #[test]
    fn depth_rejects_out_of_range() {
        for raw in [0u8, 5, 8, 255] {
            let err = BitDepth::from_bits(raw).unwrap_err();
            assert!(matches!(err, HeaderError::InvalidDepth { raw: r } if r == raw));
            assert_eq!(err.kind(), ErrorKind::InvalidDepth);
        }
    }

    #[test]
    fn depth_scan_order_is_ascending() {
        let bits: Vec<u8> = BitDepth::ALL.iter().map(|d| d.bits()).collect();
        assert_eq!(bits, vec![1, 2, 3, 4]);
    }

    #[test]
    fn depth_serde_uses_plain_integer() {
        assert_eq!(serde_json::to_string(&BitDepth::Three).unwrap(), "3");
        assert_eq!(serde_json::from_str::<BitDepth>("2").unwrap(), BitDepth::Two);
        assert!(serde_json::from_str::<BitDepth>("7").is_err());
    }

    #[test]
    fn summary_mentions_fields() {
        let s = StegoHeader::new(BitDepth::Four, 42).summary();
        assert!(s.contains("depth=4"));
        assert!(s.contains("len=42"));
    }
}
