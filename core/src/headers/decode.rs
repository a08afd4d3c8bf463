//! headers/decode.rs
//!
//! Design notes:
//! - Parses the first six bytes of a candidate bit stream.
//! - Version is validated here; plausibility of the length is the scanner's
//!   call since it depends on the remaining capacity.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::HEADER_LEN;
use crate::headers::types::{HeaderError, StegoHeader};

/// Parse and validate a header from the front of `buf`.
///
/// # Returns
/// - `Ok(StegoHeader)` when the version byte matches.
/// - `Err(HeaderError::InvalidVersion)` otherwise, which rejects the depth hypothesis.
#[inline]
pub fn decode_header_be(buf: &[u8]) -> Result<StegoHeader, HeaderError> {
    if buf.len() < HEADER_LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: HEADER_LEN });
    }

    let h = StegoHeader {
        version: buf[0],
        bits_per_channel: buf[1],
        payload_len: BigEndian::read_u32(&buf[2..6]),
    };
    h.validate()?;
    Ok(h)
}
