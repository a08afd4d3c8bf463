use std::fmt;

use crate::{
    bitplane::CodecError,
    config::ConfigError,
    crypto::CryptoError,
    envelope::EnvelopeError,
    headers::HeaderError,
    pixels::PixelError,
};

/// Unified error covering pixels, codec, envelope, crypto, and config.
/// - `From<T>` impls enable `?` across the pipeline.
/// - The originating stage stays visible: no variant is re-labelled on the way up.
#[derive(Debug, thiserror::Error)]
pub enum StegoError {
    /// Bit-plane embed/extract failure.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Envelope build/parse/open failure.
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Pixel buffer or image file failure.
    #[error("pixel error: {0}")]
    Pixels(#[from] PixelError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<CryptoError> for StegoError {
    fn from(e: CryptoError) -> Self {
        StegoError::Envelope(EnvelopeError::Crypto(e))
    }
}

impl From<HeaderError> for StegoError {
    fn from(e: HeaderError) -> Self {
        StegoError::Codec(CodecError::Header(e))
    }
}

/// Flat classification for callers that map failures to their own surface
/// (status codes, user messages) without matching nested enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CapacityExceeded,
    MissingField,
    MalformedEnvelope,
    KeyUnwrap,
    Authentication,
    NoPayloadFound,
    TruncatedPayload,
    InvalidDepth,
    InvalidKey,
    InvalidImage,
    Config,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::CapacityExceeded  => "capacity_exceeded",
            ErrorKind::MissingField      => "missing_field",
            ErrorKind::MalformedEnvelope => "malformed_envelope",
            ErrorKind::KeyUnwrap         => "key_unwrap",
            ErrorKind::Authentication    => "authentication",
            ErrorKind::NoPayloadFound    => "no_payload_found",
            ErrorKind::TruncatedPayload  => "truncated_payload",
            ErrorKind::InvalidDepth      => "invalid_depth",
            ErrorKind::InvalidKey        => "invalid_key",
            ErrorKind::InvalidImage      => "invalid_image",
            ErrorKind::Config            => "config",
            ErrorKind::Internal          => "internal",
        };
        f.write_str(name)
    }
}

impl HeaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeaderError::InvalidDepth { .. } => ErrorKind::InvalidDepth,
            HeaderError::BufferTooShort { .. } | HeaderError::InvalidVersion { .. } => ErrorKind::NoPayloadFound,
        }
    }
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::CapacityExceeded { .. } | CodecError::PayloadTooLarge { .. } => ErrorKind::CapacityExceeded,
            CodecError::NoPayloadFound => ErrorKind::NoPayloadFound,
            CodecError::TruncatedPayload { .. } => ErrorKind::TruncatedPayload,
            CodecError::Header(e) => e.kind(),
        }
    }
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::Authentication => ErrorKind::Authentication,
            CryptoError::KeyUnwrap(_) => ErrorKind::KeyUnwrap,
            CryptoError::InvalidKey(_) | CryptoError::WeakKey { .. } => ErrorKind::InvalidKey,
            CryptoError::InvalidKeyLen { .. } => ErrorKind::KeyUnwrap,
            CryptoError::InvalidNonceLen { .. } | CryptoError::InvalidTagLen { .. } => ErrorKind::MalformedEnvelope,
            CryptoError::KeyWrap(_) | CryptoError::Failure(_) => ErrorKind::Internal,
        }
    }
}

impl EnvelopeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvelopeError::MissingField(_) => ErrorKind::MissingField,
            EnvelopeError::Malformed(_) => ErrorKind::MalformedEnvelope,
            EnvelopeError::Crypto(e) => e.kind(),
        }
    }
}

impl StegoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StegoError::Codec(e) => e.kind(),
            StegoError::Envelope(e) => e.kind(),
            StegoError::Pixels(_) => ErrorKind::InvalidImage,
            StegoError::Config(_) => ErrorKind::Config,
        }
    }
}
