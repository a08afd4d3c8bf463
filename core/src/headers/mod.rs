//! headers/mod.rs
//! The 6-byte self-describing header written at bit-plane offset 0.
//!
//! Notes:
//! - Layout is bit-exact: byte 0 version, byte 1 bits per channel,
//!   bytes 2..6 payload length as big-endian u32.
//! - The version byte is the only thing a blind depth scan can check before
//!   committing to a hypothesis, so it never changes within a format.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
