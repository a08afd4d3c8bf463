//! config.rs
//! Tunables for depth selection, the blind scan, and RSA keys.
//!
//! Design notes:
//! - Every field has a default, so `{}` is a valid configuration document.
//! - Values are validated once at load time; the codec trusts them afterwards.
//! - Wire-level constants are not configurable (see `constants.rs`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{thresholds, DEFAULT_RSA_BITS, MIN_RSA_BITS};
use crate::crypto::{generate_keypair, KeyPairPem, OaepHash};
use crate::types::StegoError;

/// Mean edge response cut-offs mapping complexity to embedding depth.
///
/// `complexity < depth_1_below` → 1 bpc, `< depth_2_below` → 2,
/// `< depth_3_below` → 3, otherwise 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthThresholds {
    pub depth_1_below: f64,
    pub depth_2_below: f64,
    pub depth_3_below: f64,
}

impl Default for DepthThresholds {
    fn default() -> Self {
        Self {
            depth_1_below: thresholds::DEPTH_1_BELOW,
            depth_2_below: thresholds::DEPTH_2_BELOW,
            depth_3_below: thresholds::DEPTH_3_BELOW,
        }
    }
}

/// What to do when a header declares more payload than the image holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Pad the missing tail with zero bits (lossy, matches legacy output).
    #[default]
    ZeroPad,
    /// Fail with `TruncatedPayload`.
    ///
    /// Only reachable with `check_plausible_length` off: the plausibility
    /// check skips every overclaiming header before truncation can happen,
    /// so `validate` rejects the combination.
    Strict,
}

/// Controls how the blind depth scan accepts a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanPolicy {
    /// Reject a version-matching header whose declared payload cannot fit in
    /// the capacity remaining at that depth.
    pub check_plausible_length: bool,
    pub truncation: TruncationPolicy,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            check_plausible_length: true,
            truncation: TruncationPolicy::ZeroPad,
        }
    }
}

impl ScanPolicy {
    /// First syntactically valid header wins, short payloads are zero padded.
    pub fn legacy() -> Self {
        Self { check_plausible_length: false, truncation: TruncationPolicy::ZeroPad }
    }

    /// First syntactically valid header wins, short payloads are an error.
    pub fn strict_truncation() -> Self {
        Self { check_plausible_length: false, truncation: TruncationPolicy::Strict }
    }
}

/// Top-level configuration for the concealment core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub thresholds: DepthThresholds,
    pub scan: ScanPolicy,
    /// Modulus size for `generate_keypair`.
    pub rsa_key_bits: usize,
    /// OAEP hash for wrapping and unwrapping session keys.
    pub oaep_hash: OaepHash,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            thresholds: DepthThresholds::default(),
            scan: ScanPolicy::default(),
            rsa_key_bits: DEFAULT_RSA_BITS,
            oaep_hash: OaepHash::default(),
        }
    }
}

impl StegoConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: StegoConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let ordered = t.depth_1_below.is_finite()
            && t.depth_3_below.is_finite()
            && 0.0 <= t.depth_1_below
            && t.depth_1_below <= t.depth_2_below
            && t.depth_2_below <= t.depth_3_below;
        if !ordered {
            return Err(ConfigError::Validation(format!(
                "thresholds must be finite, non-negative and ascending: {} / {} / {}",
                t.depth_1_below, t.depth_2_below, t.depth_3_below
            )));
        }

        if self.scan.check_plausible_length && self.scan.truncation == TruncationPolicy::Strict {
            return Err(ConfigError::Validation(
                "scan.truncation \"strict\" needs scan.check_plausible_length false".into(),
            ));
        }

        if self.rsa_key_bits < MIN_RSA_BITS {
            return Err(ConfigError::Validation(format!(
                "rsa_key_bits {} below minimum {}",
                self.rsa_key_bits, MIN_RSA_BITS
            )));
        }
        Ok(())
    }

    /// Generate a recipient key pair of `rsa_key_bits`.
    pub fn generate_keypair(&self, passphrase: Option<&[u8]>) -> Result<KeyPairPem, StegoError> {
        self.validate()?;
        Ok(generate_keypair(self.rsa_key_bits, passphrase)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
