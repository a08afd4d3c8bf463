//! bitplane/mod.rs
//! Adaptive LSB codec: header + payload packed into the low bits of R, G, B.
//!
//! Notes:
//! - Slots are the low `bpc` bits of each colour sample, in raster order,
//!   three per pixel. Alpha and any extra channels are never read or written.
//! - Bits are MSB-first per byte and per slot. A short final group is
//!   left-aligned inside its slot.
//! - Extraction needs no side channel: it scans depths 1..=4 looking for the
//!   header version byte.

pub mod types;
pub mod bits;
pub mod embed;
pub mod extract;

pub use types::*;
pub use embed::*;
pub use extract::*;
