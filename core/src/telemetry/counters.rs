// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters filled in while a conceal or reveal call runs.
//!
//! Summary: byte counts per layer and bit-plane usage.
//! Converted into an immutable TelemetrySnapshot at the end of the call.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::bitplane::{EmbedResult, ExtractMeta};
use crate::constants::HEADER_LEN;

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub bytes_plaintext: u64,
    pub bytes_ciphertext: u64,
    pub bytes_envelope: u64,
    pub bytes_header: u64,
    pub bits_embedded: u64,
    pub bits_capacity: u64,
    pub samples_touched: u64,
    pub depth_probes: u64,
}

impl TelemetryCounters {
    /// Record a sealed message: plaintext in, ciphertext out.
    pub fn add_seal(&mut self, pt_len: usize, ct_len: usize) {
        self.bytes_plaintext += pt_len as u64;
        self.bytes_ciphertext += ct_len as u64;
    }

    /// Record a decrypted message.
    pub fn add_open(&mut self, ct_len: usize, pt_len: usize) {
        self.bytes_ciphertext += ct_len as u64;
        self.bytes_plaintext += pt_len as u64;
    }

    /// Record the serialized envelope length.
    pub fn add_envelope(&mut self, envelope_len: usize) {
        self.bytes_envelope += envelope_len as u64;
    }

    /// Record one embed.
    pub fn add_embed(&mut self, result: &EmbedResult) {
        let d = result.bits_per_channel.max(1) as u64;
        self.bytes_header += HEADER_LEN as u64;
        self.bits_embedded += result.used_bits;
        self.bits_capacity += result.capacity_bits;
        self.samples_touched += result.used_bits.div_ceil(d);
    }

    /// Record one extract. `scan_depth` also counts the rejected probes below it.
    pub fn add_extract(&mut self, meta: &ExtractMeta) {
        let d = meta.scan_depth.max(1) as u64;
        let bits = (HEADER_LEN as u64 + meta.payload_length as u64) * 8;
        self.bytes_header += HEADER_LEN as u64;
        self.bits_embedded += bits;
        self.samples_touched += bits.div_ceil(d);
        self.depth_probes += d;
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_ciphertext += other.bytes_ciphertext;
        self.bytes_envelope += other.bytes_envelope;
        self.bytes_header += other.bytes_header;
        self.bits_embedded += other.bits_embedded;
        self.bits_capacity += other.bits_capacity;
        self.samples_touched += other.samples_touched;
        self.depth_probes += other.depth_probes;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
