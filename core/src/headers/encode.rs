//! headers/encode.rs
//!
//! Design notes:
//! - Serializes `StegoHeader` into exactly six bytes, big-endian length.
//! - Field order must match `decode.rs`.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::HEADER_LEN;
use crate::headers::types::StegoHeader;

/// Serialize a header into its fixed 6-byte wire form.
#[inline]
pub fn encode_header_be(h: &StegoHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    out[0] = h.version;                                  // 0     version
    out[1] = h.bits_per_channel;                         // 1     bits per channel
    BigEndian::write_u32(&mut out[2..6], h.payload_len); // 2..6  payload length
    out
}
