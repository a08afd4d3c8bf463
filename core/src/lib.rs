//! stegcrypt-core
//!
//! Conceals an encrypted message inside a lossless raster image and recovers it.
//! Pure Rust, synchronous, no global state.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

// Building blocks
pub mod headers;
pub mod pixels;
pub mod complexity;
pub mod crypto;
pub mod envelope;
pub mod bitplane;
pub mod telemetry;

// Conceal / reveal
pub mod pipeline;

pub use config::{DepthThresholds, ScanPolicy, StegoConfig, TruncationPolicy};
pub use types::{ErrorKind, StegoError};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::bitplane::{capacity_bytes, embed, extract, extract_with, EmbedResult, ExtractMeta};
    pub use crate::complexity::estimate_depth;
    pub use crate::config::{ScanPolicy, StegoConfig, TruncationPolicy};
    pub use crate::crypto::{generate_keypair, KeyPairPem, OaepHash};
    pub use crate::envelope::{
        build_envelope, build_envelope_with, open_envelope, open_envelope_with, EnvelopeInput, EnvelopeMode,
        OpenedEnvelope, PrecomputedFields, PrivateKeyPem,
    };
    pub use crate::headers::BitDepth;
    pub use crate::pipeline::{conceal, reveal, ConcealParams, Concealed, RevealParams, Revealed};
    pub use crate::pixels::{decode_image, load_image, save_png, PixelBuffer};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{ErrorKind, StegoError};
}
