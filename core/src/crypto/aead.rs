// ## 📂 File: `src/crypto/aead.rs`

//! src/crypto/aead.rs
//! AES-256-GCM with a detached 16-byte tag.
//!
//! Design notes:
//! - 32-byte keys, 12-byte random nonces, no AAD.
//! - Tag verification must fail closed: on mismatch no plaintext leaves this module.
//! - Keys and nonces come from the OS CSPRNG, fresh per message.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce as AesNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::types::{CryptoError, SealedMessage, SessionKey, KEY_LEN_32, NONCE_LEN_12, TAG_LEN};

/// Fresh random 256-bit key.
pub fn generate_key() -> SessionKey {
    let mut key = Zeroizing::new([0u8; KEY_LEN_32]);
    OsRng.fill_bytes(&mut key[..]);
    key
}

/// Fresh random 96-bit nonce.
pub fn generate_nonce() -> [u8; NONCE_LEN_12] {
    let mut nonce = [0u8; NONCE_LEN_12];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm, CryptoError> {
    if key.len() != KEY_LEN_32 {
        return Err(CryptoError::InvalidKeyLen { expected: KEY_LEN_32, actual: key.len() });
    }
    Aes256Gcm::new_from_slice(key)
        .map_err(|_| CryptoError::InvalidKeyLen { expected: KEY_LEN_32, actual: key.len() })
}

/// Seal `plaintext` under `key` with the given nonce.
pub fn aes_gcm_seal(
    key: &[u8],
    nonce: &[u8; NONCE_LEN_12],
    plaintext: &[u8],
) -> Result<SealedMessage, CryptoError> {
    let cipher = cipher_for(key)?;
    let mut ciphertext = cipher
        .encrypt(AesNonce::from_slice(nonce), Payload { msg: plaintext, aad: &[] })
        .map_err(|_| CryptoError::Failure("AES-GCM seal failed".into()))?;

    // aes-gcm appends the tag; the envelope carries it separately.
    let tag_start = ciphertext.len() - TAG_LEN;
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&ciphertext[tag_start..]);
    ciphertext.truncate(tag_start);

    Ok(SealedMessage { ciphertext, nonce: *nonce, tag })
}

/// Encrypt under `key`, or under a freshly generated key when `None`.
///
/// Returns the sealed message and the key that was used, so the caller can
/// wrap it for the recipient.
pub fn aes_gcm_encrypt(
    plaintext: &[u8],
    key: Option<&[u8]>,
) -> Result<(SealedMessage, SessionKey), CryptoError> {
    let session_key = match key {
        Some(k) => {
            if k.len() != KEY_LEN_32 {
                return Err(CryptoError::InvalidKeyLen { expected: KEY_LEN_32, actual: k.len() });
            }
            let mut owned = Zeroizing::new([0u8; KEY_LEN_32]);
            owned.copy_from_slice(k);
            owned
        }
        None => generate_key(),
    };
    let sealed = aes_gcm_seal(&session_key[..], &generate_nonce(), plaintext)?;
    Ok((sealed, session_key))
}

/// Verify and decrypt. Any corruption of ciphertext or tag yields
/// `CryptoError::Authentication` and no plaintext.
pub fn aes_gcm_decrypt(
    ciphertext: &[u8],
    key: &[u8],
    nonce: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if nonce.len() != NONCE_LEN_12 {
        return Err(CryptoError::InvalidNonceLen { expected: NONCE_LEN_12, actual: nonce.len() });
    }
    if tag.len() != TAG_LEN {
        return Err(CryptoError::InvalidTagLen { expected: TAG_LEN, actual: tag.len() });
    }
    let cipher = cipher_for(key)?;

    let mut ct_and_tag = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    ct_and_tag.extend_from_slice(ciphertext);
    ct_and_tag.extend_from_slice(tag);

    cipher
        .decrypt(AesNonce::from_slice(nonce), Payload { msg: &ct_and_tag, aad: &[] })
        .map_err(|_| CryptoError::Authentication)
}

/// Convenience over `aes_gcm_decrypt` for a `SealedMessage`.
pub fn aes_gcm_open(key: &[u8], sealed: &SealedMessage) -> Result<Vec<u8>, CryptoError> {
    aes_gcm_decrypt(&sealed.ciphertext, key, &sealed.nonce, &sealed.tag)
}
