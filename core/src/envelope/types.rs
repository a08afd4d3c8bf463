//! envelope/types.rs

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::constants::mode_ids;
use crate::crypto::CryptoError;

/// How the envelope's ciphertext was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeMode {
    /// Encrypted and key-wrapped by this core.
    ServerEncrypted,
    /// Fields supplied pre-encrypted by the caller.
    EmbedOnly,
}

impl EnvelopeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EnvelopeMode::ServerEncrypted => mode_ids::SERVER_ENCRYPTED,
            EnvelopeMode::EmbedOnly => mode_ids::EMBED_ONLY,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        match raw {
            mode_ids::SERVER_ENCRYPTED => Ok(EnvelopeMode::ServerEncrypted),
            mode_ids::EMBED_ONLY => Ok(EnvelopeMode::EmbedOnly),
            other => Err(EnvelopeError::Malformed(format!("unknown mode {:?}", other))),
        }
    }
}

impl fmt::Display for EnvelopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded envelope. Binary fields are raw bytes; base64 only exists on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub mode: EnvelopeMode,
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
    pub tag: Vec<u8>,
    pub wrapped_key: Vec<u8>,
}

/// Fields a caller produced elsewhere, for `embed_only` envelopes.
/// `None` or empty means absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecomputedFields {
    pub ciphertext: Option<Vec<u8>>,
    pub nonce: Option<Vec<u8>>,
    pub tag: Option<Vec<u8>>,
    pub wrapped_key: Option<Vec<u8>>,
}

impl PrecomputedFields {
    pub fn new(ciphertext: Vec<u8>, nonce: Vec<u8>, tag: Vec<u8>, wrapped_key: Vec<u8>) -> Self {
        Self {
            ciphertext: Some(ciphertext),
            nonce: Some(nonce),
            tag: Some(tag),
            wrapped_key: Some(wrapped_key),
        }
    }

    /// Build from base64 text as submitted by form-based callers.
    /// Absent or empty strings stay absent; invalid base64 is `Malformed`.
    pub fn from_base64(
        ciphertext: Option<&str>,
        nonce: Option<&str>,
        tag: Option<&str>,
        wrapped_key: Option<&str>,
    ) -> Result<Self, EnvelopeError> {
        Ok(Self {
            ciphertext: decode_optional_b64("ciphertext", ciphertext)?,
            nonce: decode_optional_b64("nonce", nonce)?,
            tag: decode_optional_b64("tag", tag)?,
            wrapped_key: decode_optional_b64("wrapped_key", wrapped_key)?,
        })
    }
}

fn decode_optional_b64(name: &'static str, value: Option<&str>) -> Result<Option<Vec<u8>>, EnvelopeError> {
    match value {
        None | Some("") => Ok(None),
        Some(text) => decode_b64(name, text).map(Some),
    }
}

pub(crate) fn decode_b64(name: &'static str, text: &str) -> Result<Vec<u8>, EnvelopeError> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| EnvelopeError::Malformed(format!("field {} is not valid base64: {}", name, e)))
}

/// What to build an envelope from.
#[derive(Debug, Clone)]
pub enum EnvelopeInput<'a> {
    /// Encrypt here; requires the recipient's public key.
    Plaintext(&'a [u8]),
    /// Serialize caller-provided ciphertext fields as-is.
    Precomputed(PrecomputedFields),
}

impl EnvelopeInput<'_> {
    pub fn mode(&self) -> EnvelopeMode {
        match self {
            EnvelopeInput::Plaintext(_) => EnvelopeMode::ServerEncrypted,
            EnvelopeInput::Precomputed(_) => EnvelopeMode::EmbedOnly,
        }
    }
}

/// Private key PEM plus optional passphrase for encrypted PKCS#8.
#[derive(Clone, Copy)]
pub struct PrivateKeyPem<'a> {
    pub pem: &'a str,
    pub passphrase: Option<&'a [u8]>,
}

impl<'a> PrivateKeyPem<'a> {
    pub fn new(pem: &'a str) -> Self {
        Self { pem, passphrase: None }
    }

    pub fn with_passphrase(mut self, passphrase: &'a [u8]) -> Self {
        self.passphrase = Some(passphrase);
        self
    }
}

impl fmt::Debug for PrivateKeyPem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyPem")
            .field("pem", &"<redacted>")
            .field("passphrase", &self.passphrase.map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of `open_envelope`. `plaintext` is present only when a private key
/// was supplied and the tag verified.
#[derive(Debug, Clone)]
pub struct OpenedEnvelope {
    pub envelope: Envelope,
    pub plaintext: Option<Zeroizing<Vec<u8>>>,
}

impl OpenedEnvelope {
    pub fn mode(&self) -> EnvelopeMode {
        self.envelope.mode
    }

    pub fn is_decrypted(&self) -> bool {
        self.plaintext.is_some()
    }

    /// Plaintext as text, invalid UTF-8 replaced.
    pub fn plaintext_lossy(&self) -> Option<String> {
        self.plaintext
            .as_ref()
            .map(|p| String::from_utf8_lossy(p).into_owned())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// A required input is absent when building.
    #[error("missing envelope field: {0}")]
    MissingField(&'static str),

    /// Extracted bytes are not a well-formed envelope.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// Key unwrap or authentication failure while opening, or key problems while building.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
