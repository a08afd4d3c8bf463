// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! Header struct, the typed embedding depth, and header errors.

use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::constants::{HEADER_LEN, HEADER_VERSION};

/// Number of low bits per colour sample that carry payload.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BitDepth {
    One   = 1,
    Two   = 2,
    Three = 3,
    Four  = 4,
}

impl BitDepth {
    /// Scan order used by blind extraction.
    pub const ALL: [BitDepth; 4] = [BitDepth::One, BitDepth::Two, BitDepth::Three, BitDepth::Four];

    pub fn from_bits(raw: u8) -> Result<Self, HeaderError> {
        Self::try_from_primitive(raw).map_err(|_| HeaderError::InvalidDepth { raw })
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Mask selecting the payload bits of a sample.
    #[inline]
    pub fn low_mask(self) -> u8 {
        (1u8 << self.bits()) - 1
    }

    /// Mask selecting the cover bits that survive embedding.
    #[inline]
    pub fn keep_mask(self) -> u8 {
        !self.low_mask()
    }
}

impl From<BitDepth> for u8 {
    fn from(d: BitDepth) -> u8 {
        d.bits()
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bpc", self.bits())
    }
}

/// Header preceding every payload in the bit-plane stream.
///
/// `bits_per_channel` is kept raw: extraction reports what the header says,
/// even though the scan itself reads at the probed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StegoHeader {
    pub version: u8,
    pub bits_per_channel: u8,
    pub payload_len: u32,
}

impl StegoHeader {
    pub const LEN: usize = HEADER_LEN;

    pub fn new(depth: BitDepth, payload_len: u32) -> Self {
        Self {
            version: HEADER_VERSION,
            bits_per_channel: depth.bits(),
            payload_len,
        }
    }

    /// Only the version is authoritative. A mismatch rejects the hypothesis.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.version != HEADER_VERSION {
            return Err(HeaderError::InvalidVersion { have: self.version, need: HEADER_VERSION });
        }
        Ok(())
    }

    /// Payload size in bits as declared by the header.
    #[inline]
    pub fn payload_bits(&self) -> u64 {
        self.payload_len as u64 * 8
    }

    /// Short human-readable summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "v{} depth={} len={}",
            self.version, self.bits_per_channel, self.payload_len
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// Fewer than six bytes available.
    #[error("header buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    /// Version byte does not match the format constant.
    #[error("invalid header version: expected {need:#04x}, got {have:#04x}")]
    InvalidVersion { have: u8, need: u8 },

    /// Depth outside the supported range.
    #[error("invalid bits per channel: {raw} (supported 1..=4)")]
    InvalidDepth { raw: u8 },
}
