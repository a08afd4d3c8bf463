//! bitplane/types.rs

use serde::{Deserialize, Serialize};

use crate::headers::HeaderError;

/// Usage statistics for one embed call. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedResult {
    pub bits_per_channel: u8,
    pub capacity_bits: u64,
    /// Header plus payload bits written.
    pub used_bits: u64,
    /// `used_bits` rounded up to whole bytes.
    pub used_bytes: u64,
}

impl EmbedResult {
    /// Fraction of the capacity at this depth that was used.
    pub fn utilization(&self) -> f64 {
        if self.capacity_bits == 0 {
            0.0
        } else {
            self.used_bits as f64 / self.capacity_bits as f64
        }
    }
}

/// What extraction learned from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractMeta {
    /// Depth recorded in the header.
    pub bits_per_channel: u8,
    /// Payload length recorded in the header.
    pub payload_length: u32,
    /// Depth at which the header was found.
    pub scan_depth: u8,
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Header plus payload does not fit at this depth. Nothing was written.
    #[error("capacity exceeded: need {needed_bits} bits, have {capacity_bits} at {bits_per_channel} bpc")]
    CapacityExceeded { needed_bits: u64, capacity_bits: u64, bits_per_channel: u8 },

    /// Payload longer than the header's u32 length field can describe.
    #[error("payload of {len} bytes exceeds the 32-bit length field")]
    PayloadTooLarge { len: usize },

    /// No depth produced a header with the expected version.
    #[error("no payload found at any depth (1..=4)")]
    NoPayloadFound,

    /// Header declared more payload than the image holds (strict policy only).
    #[error("payload truncated: header declares {declared_bits} bits, image holds {available_bits}")]
    TruncatedPayload { declared_bits: u64, available_bits: u64 },

    /// Unsupported depth requested.
    #[error(transparent)]
    Header(#[from] HeaderError),
}
