//! envelope/decode.rs
//!
//! Design notes:
//! - Parsing validates structure and base64 only; it never touches keys.
//! - Opening checks nonce/tag sizes, unwraps the key, then verifies and
//!   decrypts. Each stage fails with its own error; none returns partial output.

use log::debug;
use rsa::RsaPrivateKey;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::crypto::{
    aes_gcm_decrypt, parse_private_key_pem, unwrap_key, CryptoError, OaepHash, KEY_LEN_32, NONCE_LEN_12, TAG_LEN,
};
use crate::envelope::types::{decode_b64, Envelope, EnvelopeError, EnvelopeMode, OpenedEnvelope, PrivateKeyPem};

/// Wire layout as read back. Every field optional so absence is reported by name.
#[derive(Deserialize)]
struct RawEnvelope {
    mode: Option<String>,
    ciphertext: Option<String>,
    nonce: Option<String>,
    tag: Option<String>,
    wrapped_key: Option<String>,
}

fn required(name: &'static str, v: Option<String>) -> Result<String, EnvelopeError> {
    v.ok_or_else(|| EnvelopeError::Malformed(format!("missing field {}", name)))
}

impl Envelope {
    /// Parse extracted payload bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let raw: RawEnvelope = serde_json::from_slice(bytes)
            .map_err(|e| EnvelopeError::Malformed(format!("not an envelope: {}", e)))?;

        let mode = EnvelopeMode::parse(&required("mode", raw.mode)?)?;
        Ok(Self {
            mode,
            ciphertext: decode_b64("ciphertext", &required("ciphertext", raw.ciphertext)?)?,
            nonce: decode_b64("nonce", &required("nonce", raw.nonce)?)?,
            tag: decode_b64("tag", &required("tag", raw.tag)?)?,
            wrapped_key: decode_b64("wrapped_key", &required("wrapped_key", raw.wrapped_key)?)?,
        })
    }

    /// Check nonce and tag sizes before any key is touched.
    pub fn check_sizes(&self) -> Result<(), EnvelopeError> {
        if self.nonce.len() != NONCE_LEN_12 {
            return Err(EnvelopeError::Malformed(format!(
                "nonce must be {} bytes, got {}",
                NONCE_LEN_12,
                self.nonce.len()
            )));
        }
        if self.tag.len() != TAG_LEN {
            return Err(EnvelopeError::Malformed(format!(
                "tag must be {} bytes, got {}",
                TAG_LEN,
                self.tag.len()
            )));
        }
        Ok(())
    }

    /// RSA-OAEP unwrap of the session key. Anything but 32 bytes is a failed unwrap.
    pub fn unwrap_session_key(
        &self,
        private: &RsaPrivateKey,
        hash: OaepHash,
    ) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
        let session_key = unwrap_key(private, &self.wrapped_key, hash)?;
        if session_key.len() != KEY_LEN_32 {
            return Err(CryptoError::KeyUnwrap(format!(
                "unwrapped key is {} bytes, expected {}",
                session_key.len(),
                KEY_LEN_32
            ))
            .into());
        }
        Ok(session_key)
    }

    /// Verify the tag and decrypt with an already unwrapped session key.
    pub fn decrypt_with(&self, session_key: &[u8]) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
        self.check_sizes()?;
        let plaintext = aes_gcm_decrypt(&self.ciphertext, session_key, &self.nonce, &self.tag)?;
        Ok(Zeroizing::new(plaintext))
    }

    /// Unwrap the session key and verify/decrypt the ciphertext.
    pub fn open(&self, private: &RsaPrivateKey, hash: OaepHash) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
        self.check_sizes()?;
        let session_key = self.unwrap_session_key(private, hash)?;
        self.decrypt_with(&session_key)
    }
}

/// Parse envelope bytes without decrypting.
pub fn parse_envelope(bytes: &[u8]) -> Result<Envelope, EnvelopeError> {
    Envelope::from_bytes(bytes)
}

/// Parse envelope bytes and, when a private key is given, decrypt them with
/// the default OAEP hash.
pub fn open_envelope(bytes: &[u8], private_key: Option<PrivateKeyPem<'_>>) -> Result<OpenedEnvelope, EnvelopeError> {
    open_envelope_with(bytes, private_key, OaepHash::default())
}

/// `open_envelope` with an explicit OAEP hash.
pub fn open_envelope_with(
    bytes: &[u8],
    private_key: Option<PrivateKeyPem<'_>>,
    hash: OaepHash,
) -> Result<OpenedEnvelope, EnvelopeError> {
    let envelope = Envelope::from_bytes(bytes)?;
    let plaintext = match private_key {
        Some(key) => {
            let private = parse_private_key_pem(key.pem, key.passphrase)?;
            let pt = envelope.open(&private, hash)?;
            debug!("opened {} envelope: plaintext={}B", envelope.mode, pt.len());
            Some(pt)
        }
        None => None,
    };
    Ok(OpenedEnvelope { envelope, plaintext })
}
