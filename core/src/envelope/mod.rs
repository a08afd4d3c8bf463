//! envelope/mod.rs
//! Authenticated-ciphertext envelope: the byte string that ends up in pixels.
//!
//! Notes:
//! - Serialized as compact JSON with fixed field order
//!   `mode, ciphertext, nonce, tag, wrapped_key`; binary fields are base64.
//! - `server_encrypted` envelopes are produced here (AES-256-GCM + RSA-OAEP).
//!   `embed_only` envelopes carry fields a client already produced.
//! - Plaintext is only released after the GCM tag verifies.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
