//! envelope/encode.rs
//!
//! Design notes:
//! - `seal` generates a fresh key and nonce per message; nothing is reused.
//! - The session key is wiped once wrapped.
//! - Serialization is compact JSON with a fixed field order, so identical
//!   envelopes always produce identical bytes.

use base64::{engine::general_purpose::STANDARD, Engine};
use log::debug;
use rsa::RsaPublicKey;
use serde::Serialize;

use crate::crypto::{aes_gcm_encrypt, parse_public_key_pem, wrap_key, OaepHash, SealedMessage};
use crate::envelope::types::{Envelope, EnvelopeError, EnvelopeInput, EnvelopeMode, PrecomputedFields};

/// Wire layout. Field order here is the serialized order.
#[derive(Serialize)]
struct WireEnvelope<'a> {
    mode: &'a str,
    ciphertext: String,
    nonce: String,
    tag: String,
    wrapped_key: String,
}

impl Envelope {
    /// Encrypt `plaintext` under a fresh AES-256-GCM key and wrap that key
    /// for `recipient` with RSA-OAEP.
    pub fn seal(plaintext: &[u8], recipient: &RsaPublicKey, hash: OaepHash) -> Result<Self, EnvelopeError> {
        let (sealed, session_key) = aes_gcm_encrypt(plaintext, None)?;
        let wrapped_key = wrap_key(recipient, &session_key[..], hash)?;
        drop(session_key);

        debug!(
            "sealed envelope: plaintext={}B ciphertext={}B wrapped_key={}B",
            plaintext.len(),
            sealed.ciphertext.len(),
            wrapped_key.len()
        );

        Ok(Self::server_encrypted(sealed, wrapped_key))
    }

    /// Assemble a `server_encrypted` envelope from already sealed parts.
    pub fn server_encrypted(sealed: SealedMessage, wrapped_key: Vec<u8>) -> Self {
        Self {
            mode: EnvelopeMode::ServerEncrypted,
            ciphertext: sealed.ciphertext,
            nonce: sealed.nonce.to_vec(),
            tag: sealed.tag.to_vec(),
            wrapped_key,
        }
    }

    /// Accept caller-produced fields. Only presence is checked.
    pub fn embed_only(fields: PrecomputedFields) -> Result<Self, EnvelopeError> {
        fn require(name: &'static str, v: Option<Vec<u8>>) -> Result<Vec<u8>, EnvelopeError> {
            match v {
                Some(bytes) if !bytes.is_empty() => Ok(bytes),
                _ => Err(EnvelopeError::MissingField(name)),
            }
        }

        Ok(Self {
            mode: EnvelopeMode::EmbedOnly,
            ciphertext: require("ciphertext", fields.ciphertext)?,
            nonce: require("nonce", fields.nonce)?,
            tag: require("tag", fields.tag)?,
            wrapped_key: require("wrapped_key", fields.wrapped_key)?,
        })
    }

    /// Compact JSON bytes: the payload handed to the bit-plane codec.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EnvelopeError> {
        let wire = WireEnvelope {
            mode: self.mode.as_str(),
            ciphertext: STANDARD.encode(&self.ciphertext),
            nonce: STANDARD.encode(&self.nonce),
            tag: STANDARD.encode(&self.tag),
            wrapped_key: STANDARD.encode(&self.wrapped_key),
        };
        serde_json::to_vec(&wire).map_err(|e| EnvelopeError::Malformed(format!("serialize: {}", e)))
    }
}

/// Build and serialize an envelope, wrapping with the default OAEP hash.
///
/// `Plaintext` input needs the recipient public key PEM; `Precomputed` input
/// ignores it.
pub fn build_envelope(
    input: EnvelopeInput<'_>,
    recipient_public_key_pem: Option<&str>,
) -> Result<Vec<u8>, EnvelopeError> {
    build_envelope_with(input, recipient_public_key_pem, OaepHash::default())
}

/// `build_envelope` with an explicit OAEP hash.
pub fn build_envelope_with(
    input: EnvelopeInput<'_>,
    recipient_public_key_pem: Option<&str>,
    hash: OaepHash,
) -> Result<Vec<u8>, EnvelopeError> {
    let envelope = match input {
        EnvelopeInput::Plaintext(plaintext) => {
            let pem = recipient_public_key_pem.ok_or(EnvelopeError::MissingField("recipient_public_key"))?;
            let recipient = parse_public_key_pem(pem)?;
            Envelope::seal(plaintext, &recipient, hash)?
        }
        EnvelopeInput::Precomputed(fields) => Envelope::embed_only(fields)?,
    };
    envelope.to_bytes()
}
