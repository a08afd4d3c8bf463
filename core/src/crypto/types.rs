// ## 📂 File: `src/crypto/types.rs`

use zeroize::Zeroizing;

/// AES-256 key length.
pub const KEY_LEN_32: usize = 32;

/// Standard 12-byte nonce length for AES-GCM.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Raw AES-256 key, wiped on drop.
pub type SessionKey = Zeroizing<[u8; KEY_LEN_32]>;

/// AES-GCM output with the tag kept apart from the ciphertext, the way the
/// envelope stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN_12],
    pub tag: [u8; TAG_LEN],
}

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Invalid key length provided to cipher.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Nonce length mismatch (must be 12 bytes).
    #[error("invalid nonce length: expected={expected}, actual={actual}")]
    InvalidNonceLen { expected: usize, actual: usize },

    /// Tag length mismatch (must be 16 bytes).
    #[error("invalid tag length: expected={expected}, actual={actual}")]
    InvalidTagLen { expected: usize, actual: usize },

    /// AEAD tag mismatch. Ciphertext or tag was corrupted or tampered with.
    #[error("authentication failed: AEAD tag mismatch")]
    Authentication,

    /// RSA-OAEP decryption of the wrapped key failed (wrong key or corrupted blob).
    #[error("key unwrap failed: {0}")]
    KeyUnwrap(String),

    #[error("key wrap failed: {0}")]
    KeyWrap(String),

    /// PEM could not be parsed, or a passphrase was missing or wrong.
    #[error("invalid RSA key: {0}")]
    InvalidKey(String),

    #[error("RSA modulus too small: {bits} bits < {min}")]
    WeakKey { bits: usize, min: usize },

    #[error("crypto failure: {0}")]
    Failure(String),
}
