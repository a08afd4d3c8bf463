//! bitplane/embed.rs
//!
//! Design notes:
//! - Capacity is checked before the first sample is touched; a failed embed
//!   leaves the buffer bit-identical.
//! - Only the low `bpc` bits of R, G, B samples change. Samples past the end
//!   of the bit stream keep their original values.

use log::debug;

use crate::complexity::estimate_depth_with;
use crate::config::DepthThresholds;
use crate::constants::{HEADER_LEN, RGB_CHANNELS};
use crate::headers::{encode_header_be, BitDepth, StegoHeader};
use crate::pixels::PixelBuffer;
use crate::utils::bits_to_bytes_ceil;

use super::bits::BitCursor;
use super::types::{CodecError, EmbedResult};

/// Total slot bits at `depth`: `height * width * 3 * bpc`.
pub fn capacity_bits(pixels: &PixelBuffer, depth: BitDepth) -> u64 {
    pixels.pixel_count() as u64 * RGB_CHANNELS as u64 * depth.bits() as u64
}

/// Largest payload, in bytes, that fits after the header at `depth`.
pub fn capacity_bytes(pixels: &PixelBuffer, depth: BitDepth) -> u64 {
    (capacity_bits(pixels, depth) / 8).saturating_sub(HEADER_LEN as u64)
}

/// Write header and payload into `pixels` at `depth`.
pub fn embed_in_place(
    pixels: &mut PixelBuffer,
    payload: &[u8],
    depth: BitDepth,
) -> Result<EmbedResult, CodecError> {
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| CodecError::PayloadTooLarge { len: payload.len() })?;

    let capacity = capacity_bits(pixels, depth);
    let needed_bits = (HEADER_LEN + payload.len()) as u64 * 8;
    if needed_bits > capacity {
        return Err(CodecError::CapacityExceeded {
            needed_bits,
            capacity_bits: capacity,
            bits_per_channel: depth.bits(),
        });
    }

    let header = encode_header_be(&StegoHeader::new(depth, payload_len));
    let mut stream = Vec::with_capacity(HEADER_LEN + payload.len());
    stream.extend_from_slice(&header);
    stream.extend_from_slice(payload);

    let d = depth.bits();
    let keep = depth.keep_mask();
    let mut bits = BitCursor::new(&stream);
    let mut samples_touched = 0usize;

    for sample in pixels.rgb_samples_mut() {
        let take = bits.remaining().min(d as usize) as u8;
        if take == 0 {
            break;
        }
        // Short final group goes in the high positions of the slot.
        let value = bits.take(take) << (d - take);
        *sample = (*sample & keep) | value;
        samples_touched += 1;
    }

    debug!(
        "embedded {}B payload at {}: {}/{} bits, {} samples",
        payload.len(),
        depth,
        needed_bits,
        capacity,
        samples_touched
    );

    Ok(EmbedResult {
        bits_per_channel: d,
        capacity_bits: capacity,
        used_bits: needed_bits,
        used_bytes: bits_to_bytes_ceil(needed_bits),
    })
}

/// Embed into a copy of `pixels` at an explicit depth.
pub fn embed_with_depth(
    pixels: &PixelBuffer,
    payload: &[u8],
    depth: BitDepth,
) -> Result<(PixelBuffer, EmbedResult), CodecError> {
    let mut out = pixels.clone();
    let result = embed_in_place(&mut out, payload, depth)?;
    Ok((out, result))
}

/// Embed into a copy of `pixels`.
///
/// `bits_per_channel` must be 1..=4. When `None`, the depth comes from the
/// complexity estimator with default thresholds.
pub fn embed(
    pixels: &PixelBuffer,
    payload: &[u8],
    bits_per_channel: Option<u8>,
) -> Result<(PixelBuffer, EmbedResult), CodecError> {
    let depth = match bits_per_channel {
        Some(raw) => BitDepth::from_bits(raw)?,
        None => estimate_depth_with(pixels, &DepthThresholds::default()),
    };
    embed_with_depth(pixels, payload, depth)
}
