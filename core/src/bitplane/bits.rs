//! bitplane/bits.rs
//! MSB-first bit cursor for writing, and a slot reader for extraction.

use crate::headers::BitDepth;

/// Walks a byte slice bit by bit, most significant bit first.
pub struct BitCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bits not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.pos
    }

    /// Consume up to `n` (<= 8) bits and pack them into the low bits of a u8.
    #[inline]
    pub fn take(&mut self, n: u8) -> u8 {
        let mut v = 0u8;
        for _ in 0..n {
            if self.pos >= self.bytes.len() * 8 {
                break;
            }
            let bit = (self.bytes[self.pos / 8] >> (7 - self.pos % 8)) & 1;
            v = (v << 1) | bit;
            self.pos += 1;
        }
        v
    }
}

/// Bytes recovered from slots, and whether the samples ran out first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRead {
    pub bytes: Vec<u8>,
    /// Bits actually taken from samples, before any zero padding.
    pub bits_read: u64,
    pub truncated: bool,
}

/// Reads `depth` low bits from each sample of an iterator, MSB-first.
///
/// Reads resume at the next whole sample; bits left over in a partially
/// consumed slot are dropped.
pub struct SlotReader<I> {
    samples: I,
    depth: BitDepth,
    samples_consumed: usize,
}

impl<I: Iterator<Item = u8>> SlotReader<I> {
    pub fn new(samples: I, depth: BitDepth) -> Self {
        Self { samples, depth, samples_consumed: 0 }
    }

    pub fn samples_consumed(&self) -> usize {
        self.samples_consumed
    }

    /// Read `n_bytes`. If the samples run out, the bytes read so far are
    /// returned with the last partial byte zero padded and `truncated` set.
    pub fn read_bytes(&mut self, n_bytes: usize) -> SlotRead {
        let wanted = n_bytes as u64 * 8;
        let d = self.depth.bits();
        let mask = self.depth.low_mask();

        let mut bytes = Vec::new();
        let mut acc = 0u8;
        let mut bits_read = 0u64;

        'samples: while bits_read < wanted {
            let Some(sample) = self.samples.next() else {
                break;
            };
            self.samples_consumed += 1;
            let slot = sample & mask;
            for k in (0..d).rev() {
                if bits_read == wanted {
                    break 'samples;
                }
                acc = (acc << 1) | ((slot >> k) & 1);
                bits_read += 1;
                if bits_read % 8 == 0 {
                    bytes.push(acc);
                    acc = 0;
                }
            }
        }

        let truncated = bits_read < wanted;
        let partial = (bits_read % 8) as u32;
        if partial != 0 {
            bytes.push(acc << (8 - partial));
        }
        SlotRead { bytes, bits_read, truncated }
    }
}
