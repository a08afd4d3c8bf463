//! pixels/mod.rs
//! Decoded sample storage and the lossless image file boundary.
//!
//! The codec only ever sees `PixelBuffer`. Decoding and encoding image files
//! lives in `io` so callers that already hold raw samples never touch it.

pub mod types;
pub mod io;

pub use types::*;
pub use io::*;
