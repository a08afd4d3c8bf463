//! constants.rs
//! Wire constants shared by the header, codec, and envelope layers.
//!
//! Anything that ends up inside pixels or inside the envelope JSON is defined
//! here once. Changing a value breaks recovery of previously concealed images.

/// Version byte written at bit-plane offset 0.
pub const HEADER_VERSION: u8 = 0x01;

/// Fixed header length in bytes: version + depth + big-endian u32 length.
pub const HEADER_LEN: usize = 6;

/// Header length in bits, the amount read per depth hypothesis.
pub const HEADER_BITS: usize = HEADER_LEN * 8;

/// Colour channels carrying payload (R, G, B). Alpha is never touched.
pub const RGB_CHANNELS: usize = 3;

/// Supported embedding depths (bits per channel), inclusive.
pub const MIN_BITS_PER_CHANNEL: u8 = 1;
pub const MAX_BITS_PER_CHANNEL: u8 = 4;

/// Default complexity thresholds mapping mean edge response to a depth.
pub mod thresholds {
    pub const DEPTH_1_BELOW: f64 = 5.0;
    pub const DEPTH_2_BELOW: f64 = 12.0;
    pub const DEPTH_3_BELOW: f64 = 30.0;
}

/// Default and minimum RSA modulus size in bits.
pub const DEFAULT_RSA_BITS: usize = 2048;
pub const MIN_RSA_BITS: usize = 2048;

/// Envelope mode strings as they appear in the serialized JSON.
pub mod mode_ids {
    pub const SERVER_ENCRYPTED: &str = "server_encrypted";
    pub const EMBED_ONLY: &str = "embed_only";
}

/// Lossless formats accepted for cover and stego files.
pub const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tif", "tiff"];
