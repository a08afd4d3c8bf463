//! bitplane/extract.rs
//!
//! Design notes:
//! - Blind scan over depths 1..=4, ascending. The first depth whose 48 header
//!   bits carry the expected version byte wins.
//! - The payload is read at the scanned depth; the header's own depth field
//!   is reported back unchanged.
//! - Plausibility and truncation behaviour come from `ScanPolicy`.

use log::{debug, warn};

use crate::config::{ScanPolicy, TruncationPolicy};
use crate::constants::{HEADER_BITS, HEADER_LEN};
use crate::headers::{decode_header_be, BitDepth};
use crate::pixels::PixelBuffer;
use crate::utils::fmt_bytes;

use super::bits::SlotReader;
use super::types::{CodecError, ExtractMeta};

/// Result of probing one depth.
#[derive(Debug)]
enum Probe {
    Found(Vec<u8>, ExtractMeta),
    Rejected,
}

fn probe_depth(pixels: &PixelBuffer, depth: BitDepth, policy: &ScanPolicy) -> Result<Probe, CodecError> {
    let mut reader = SlotReader::new(pixels.rgb_samples(), depth);
    let header_read = reader.read_bytes(HEADER_LEN);

    let header = match decode_header_be(&header_read.bytes) {
        Ok(h) => h,
        Err(e) => {
            debug!("depth {}: {} (raw {})", depth.bits(), e, fmt_bytes(&header_read.bytes));
            return Ok(Probe::Rejected);
        }
    };

    let d = depth.bits() as u64;
    let header_samples = (HEADER_BITS as u64).div_ceil(d);
    let available_bits = (pixels.rgb_sample_count() as u64).saturating_sub(header_samples) * d;
    let declared_bits = header.payload_bits();

    if declared_bits > available_bits {
        if policy.check_plausible_length {
            debug!(
                "depth {}: header {} rejected, {} bits declared > {} available",
                depth.bits(),
                header.summary(),
                declared_bits,
                available_bits
            );
            return Ok(Probe::Rejected);
        }
        if policy.truncation == TruncationPolicy::Strict {
            return Err(CodecError::TruncatedPayload { declared_bits, available_bits });
        }
    }

    let payload_read = reader.read_bytes(header.payload_len as usize);
    if payload_read.truncated {
        warn!(
            "payload truncated at depth {}: {} of {} bits recovered, tail zero padded",
            depth.bits(),
            payload_read.bits_read,
            declared_bits
        );
    }

    let meta = ExtractMeta {
        bits_per_channel: header.bits_per_channel,
        payload_length: header.payload_len,
        scan_depth: depth.bits(),
    };
    Ok(Probe::Found(payload_read.bytes, meta))
}

/// Recover the payload with an explicit scan policy.
pub fn extract_with(pixels: &PixelBuffer, policy: &ScanPolicy) -> Result<(Vec<u8>, ExtractMeta), CodecError> {
    for depth in BitDepth::ALL {
        if let Probe::Found(payload, meta) = probe_depth(pixels, depth, policy)? {
            debug!(
                "payload found at depth {}: {}B (header depth {})",
                meta.scan_depth, meta.payload_length, meta.bits_per_channel
            );
            return Ok((payload, meta));
        }
    }
    Err(CodecError::NoPayloadFound)
}

/// Recover the payload with the default scan policy.
pub fn extract(pixels: &PixelBuffer) -> Result<(Vec<u8>, ExtractMeta), CodecError> {
    extract_with(pixels, &ScanPolicy::default())
}
