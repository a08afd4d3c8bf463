//! src/crypto/keywrap.rs
//! RSA-OAEP wrapping of AES session keys, plus PEM key handling.
//!
//! Design notes:
//! - OAEP uses one hash for both the label and MGF1, chosen by `OaepHash`.
//!   SHA-1 is the default so keys wrapped by existing deployments unwrap.
//!   The other hash is never tried when unwrapping fails.
//! - Only ever applied to the 32-byte session key, never to message data,
//!   so the OAEP size bound (modulus - 66 bytes) is never the limit.
//! - Public keys below `MIN_RSA_BITS` are refused before wrapping.
//! - Key material is passed in by the caller on every call; nothing is cached.

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::MIN_RSA_BITS;
use crate::crypto::types::CryptoError;

/// Hash used for the OAEP label and MGF1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OaepHash {
    #[default]
    Sha1,
    Sha256,
}

impl OaepHash {
    fn padding(self) -> Oaep {
        match self {
            OaepHash::Sha1 => Oaep::new::<Sha1>(),
            OaepHash::Sha256 => Oaep::new::<Sha256>(),
        }
    }
}

impl std::fmt::Display for OaepHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OaepHash::Sha1 => "sha1",
            OaepHash::Sha256 => "sha256",
        })
    }
}

/// PEM-encoded key pair as handed to callers.
#[derive(Clone)]
pub struct KeyPairPem {
    /// PKCS#8, encrypted PKCS#8 when generated with a passphrase.
    pub private_key_pem: Zeroizing<String>,
    /// SubjectPublicKeyInfo.
    pub public_key_pem: String,
}

impl std::fmt::Debug for KeyPairPem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairPem")
            .field("private_key_pem", &"<redacted>")
            .field("public_key_pem", &self.public_key_pem)
            .finish()
    }
}

/// Generate an RSA key pair of `bits` and export it as PEM.
///
/// With a passphrase the private key is written as encrypted PKCS#8
/// (PBES2, scrypt + AES-256-CBC).
pub fn generate_keypair(bits: usize, passphrase: Option<&[u8]>) -> Result<KeyPairPem, CryptoError> {
    if bits < MIN_RSA_BITS {
        return Err(CryptoError::WeakKey { bits, min: MIN_RSA_BITS });
    }
    let mut rng = OsRng;
    let private = RsaPrivateKey::new(&mut rng, bits)
        .map_err(|e| CryptoError::Failure(format!("RSA key generation: {}", e)))?;
    let public = RsaPublicKey::from(&private);

    let private_key_pem = match passphrase {
        Some(pass) => private.to_pkcs8_encrypted_pem(&mut rng, pass, LineEnding::LF),
        None => private.to_pkcs8_pem(LineEnding::LF),
    }
    .map_err(|e| CryptoError::Failure(format!("private key export: {}", e)))?;

    let public_key_pem = public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::Failure(format!("public key export: {}", e)))?;

    Ok(KeyPairPem { private_key_pem, public_key_pem })
}

/// Modulus size in bits.
pub fn modulus_bits(key: &RsaPublicKey) -> usize {
    key.size() * 8
}

/// Parse an SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`) PEM and enforce
/// the minimum modulus size.
pub fn parse_public_key_pem(pem: &str) -> Result<RsaPublicKey, CryptoError> {
    let key = if pem.contains("BEGIN RSA PUBLIC KEY") {
        RsaPublicKey::from_pkcs1_pem(pem).map_err(|e| CryptoError::InvalidKey(e.to_string()))?
    } else {
        RsaPublicKey::from_public_key_pem(pem).map_err(|e| CryptoError::InvalidKey(e.to_string()))?
    };

    let bits = modulus_bits(&key);
    if bits < MIN_RSA_BITS {
        return Err(CryptoError::WeakKey { bits, min: MIN_RSA_BITS });
    }
    Ok(key)
}

/// Parse a PKCS#8, PKCS#1 or encrypted PKCS#8 private key PEM.
pub fn parse_private_key_pem(pem: &str, passphrase: Option<&[u8]>) -> Result<RsaPrivateKey, CryptoError> {
    if pem.contains("BEGIN ENCRYPTED PRIVATE KEY") {
        let pass = passphrase
            .ok_or_else(|| CryptoError::InvalidKey("encrypted private key requires a passphrase".into()))?;
        return RsaPrivateKey::from_pkcs8_encrypted_pem(pem, pass)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()));
    }
    if pem.contains("BEGIN RSA PRIVATE KEY") {
        return RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| CryptoError::InvalidKey(e.to_string()));
    }
    RsaPrivateKey::from_pkcs8_pem(pem).map_err(|e| CryptoError::InvalidKey(e.to_string()))
}

/// RSA-OAEP encrypt a session key for the holder of `public`.
pub fn wrap_key(public: &RsaPublicKey, key: &[u8], hash: OaepHash) -> Result<Vec<u8>, CryptoError> {
    let bits = modulus_bits(public);
    if bits < MIN_RSA_BITS {
        return Err(CryptoError::WeakKey { bits, min: MIN_RSA_BITS });
    }
    public
        .encrypt(&mut OsRng, hash.padding(), key)
        .map_err(|e| CryptoError::KeyWrap(e.to_string()))
}

/// RSA-OAEP decrypt a wrapped session key.
pub fn unwrap_key(
    private: &RsaPrivateKey,
    wrapped: &[u8],
    hash: OaepHash,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    private
        .decrypt(hash.padding(), wrapped)
        .map(Zeroizing::new)
        .map_err(|e| CryptoError::KeyUnwrap(format!("oaep-{}: {}", hash, e)))
}

/// `wrap_key` with a PEM public key.
pub fn wrap_key_pem(public_key_pem: &str, key: &[u8], hash: OaepHash) -> Result<Vec<u8>, CryptoError> {
    wrap_key(&parse_public_key_pem(public_key_pem)?, key, hash)
}

/// `unwrap_key` with a PEM private key.
pub fn unwrap_key_pem(
    private_key_pem: &str,
    passphrase: Option<&[u8]>,
    wrapped: &[u8],
    hash: OaepHash,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    unwrap_key(&parse_private_key_pem(private_key_pem, passphrase)?, wrapped, hash)
}
