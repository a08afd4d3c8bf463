//! pipeline/core.rs
//! Stable public API: conceal a message in a cover image, reveal it again.
//!
//! Design notes:
//! - Each call owns its counters and timer; nothing survives the call.
//! - Child errors are converted with `From`, never re-labelled.

use log::{debug, info};

use crate::{
    bitplane::{embed_in_place, extract_with, EmbedResult, ExtractMeta},
    complexity::estimate_depth_with,
    config::StegoConfig,
    crypto::{aes_gcm_encrypt, parse_private_key_pem, parse_public_key_pem, wrap_key},
    envelope::{Envelope, EnvelopeError, EnvelopeInput, OpenedEnvelope, PrecomputedFields, PrivateKeyPem},
    headers::BitDepth,
    pixels::PixelBuffer,
    telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer},
    types::StegoError,
};

#[derive(Clone, Debug)]
pub struct ConcealParams<'a> {
    pub input: EnvelopeInput<'a>,
    /// Required for `EnvelopeInput::Plaintext`, ignored otherwise.
    pub recipient_public_key_pem: Option<&'a str>,
    /// Explicit depth (1..=4). `None` lets the complexity estimator decide.
    pub bits_per_channel: Option<u8>,
}

impl<'a> ConcealParams<'a> {
    pub fn plaintext(plaintext: &'a [u8], recipient_public_key_pem: &'a str) -> Self {
        Self {
            input: EnvelopeInput::Plaintext(plaintext),
            recipient_public_key_pem: Some(recipient_public_key_pem),
            bits_per_channel: None,
        }
    }

    pub fn precomputed(fields: PrecomputedFields) -> Self {
        Self {
            input: EnvelopeInput::Precomputed(fields),
            recipient_public_key_pem: None,
            bits_per_channel: None,
        }
    }

    pub fn with_depth(mut self, bits_per_channel: u8) -> Self {
        self.bits_per_channel = Some(bits_per_channel);
        self
    }

    pub fn validate(&self) -> Result<(), StegoError> {
        if let Some(raw) = self.bits_per_channel {
            BitDepth::from_bits(raw)?;
        }
        if matches!(self.input, EnvelopeInput::Plaintext(_)) && self.recipient_public_key_pem.is_none() {
            return Err(EnvelopeError::MissingField("recipient_public_key").into());
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RevealParams<'a> {
    /// Without a key the envelope is parsed but left encrypted.
    pub private_key: Option<PrivateKeyPem<'a>>,
}

impl<'a> RevealParams<'a> {
    pub fn with_key(private_key: PrivateKeyPem<'a>) -> Self {
        Self { private_key: Some(private_key) }
    }
}

/// Output of `conceal`.
#[derive(Debug, Clone)]
pub struct Concealed {
    pub stego: PixelBuffer,
    pub embed: EmbedResult,
    pub telemetry: TelemetrySnapshot,
}

/// Output of `reveal`.
#[derive(Debug, Clone)]
pub struct Revealed {
    pub opened: OpenedEnvelope,
    pub meta: ExtractMeta,
    pub telemetry: TelemetrySnapshot,
}

fn build_timed(
    params: &ConcealParams<'_>,
    config: &StegoConfig,
    counters: &mut TelemetryCounters,
    timer: &mut TelemetryTimer,
) -> Result<Envelope, StegoError> {
    match &params.input {
        EnvelopeInput::Plaintext(plaintext) => {
            let pem = params
                .recipient_public_key_pem
                .ok_or(EnvelopeError::MissingField("recipient_public_key"))?;
            let recipient = timer.time(Stage::Wrap, || parse_public_key_pem(pem))?;
            let (sealed, session_key) = timer.time(Stage::Encrypt, || aes_gcm_encrypt(plaintext, None))?;
            counters.add_seal(plaintext.len(), sealed.ciphertext.len());
            let wrapped_key =
                timer.time(Stage::Wrap, || wrap_key(&recipient, &session_key[..], config.oaep_hash))?;
            Ok(Envelope::server_encrypted(sealed, wrapped_key))
        }
        EnvelopeInput::Precomputed(fields) => Ok(Envelope::embed_only(fields.clone())?),
    }
}

/// Build an envelope for `params.input` and hide it in a copy of `cover`.
pub fn conceal(
    cover: &PixelBuffer,
    params: &ConcealParams<'_>,
    config: &StegoConfig,
) -> Result<Concealed, StegoError> {
    config.validate()?;
    params.validate()?;

    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();

    let depth = match params.bits_per_channel {
        Some(raw) => BitDepth::from_bits(raw)?,
        None => timer.time(Stage::Estimate, || estimate_depth_with(cover, &config.thresholds)),
    };

    let envelope = build_timed(params, config, &mut counters, &mut timer)?;
    let payload = timer.time(Stage::Serialize, || envelope.to_bytes())?;
    counters.add_envelope(payload.len());

    let mut stego = cover.clone();
    let embed = timer.time(Stage::Embed, || embed_in_place(&mut stego, &payload, depth))?;
    counters.add_embed(&embed);

    timer.finish();
    let telemetry = TelemetrySnapshot::from(&counters, &timer);
    info!(
        "conceal: {} envelope of {}B into {}x{} at {} ({:.2}% of capacity)",
        envelope.mode,
        payload.len(),
        cover.width(),
        cover.height(),
        depth,
        telemetry.capacity_utilization * 100.0
    );

    Ok(Concealed { stego, embed, telemetry })
}

/// Recover and parse the envelope hidden in `stego`; decrypt it when a key is given.
pub fn reveal(
    stego: &PixelBuffer,
    params: &RevealParams<'_>,
    config: &StegoConfig,
) -> Result<Revealed, StegoError> {
    config.validate()?;

    let mut timer = TelemetryTimer::new();
    let mut counters = TelemetryCounters::default();

    let (payload, meta) = timer.time(Stage::Extract, || extract_with(stego, &config.scan))?;
    counters.add_extract(&meta);
    counters.add_envelope(payload.len());

    let envelope = timer.time(Stage::Parse, || Envelope::from_bytes(&payload))?;

    let plaintext = match params.private_key {
        Some(key) => {
            envelope.check_sizes()?;
            let private = timer.time(Stage::Unwrap, || parse_private_key_pem(key.pem, key.passphrase))?;
            let session_key =
                timer.time(Stage::Unwrap, || envelope.unwrap_session_key(&private, config.oaep_hash))?;
            let plaintext = timer.time(Stage::Decrypt, || envelope.decrypt_with(&session_key))?;
            counters.add_open(envelope.ciphertext.len(), plaintext.len());
            Some(plaintext)
        }
        None => {
            debug!("reveal: no private key, leaving {} envelope sealed", envelope.mode);
            None
        }
    };

    timer.finish();
    let telemetry = TelemetrySnapshot::from(&counters, &timer);
    info!(
        "reveal: {} envelope of {}B from {}x{} at depth {} (decrypted: {})",
        envelope.mode,
        payload.len(),
        stego.width(),
        stego.height(),
        meta.scan_depth,
        plaintext.is_some()
    );

    Ok(Revealed { opened: OpenedEnvelope { envelope, plaintext }, meta, telemetry })
}
