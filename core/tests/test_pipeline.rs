// conceal / reveal end to end, error propagation, and batch helpers.

#[cfg(test)]
mod tests {

use std::sync::OnceLock;

use stegcrypt_core::{
    config::{ScanPolicy, StegoConfig},
    crypto::{generate_keypair, modulus_bits, parse_public_key_pem, KeyPairPem, OaepHash},
    envelope::{EnvelopeError, EnvelopeMode, PrecomputedFields, PrivateKeyPem},
    pipeline::{
        conceal, conceal_batch, reveal, reveal_batch, ConcealJob, ConcealParams, ParallelismProfile, RevealParams,
    },
    pixels::PixelBuffer,
    telemetry::Stage,
    types::{ErrorKind, StegoError},
};

fn keypair() -> &'static KeyPairPem {
    static KEYS: OnceLock<KeyPairPem> = OnceLock::new();
    KEYS.get_or_init(|| generate_keypair(2048, None).unwrap())
}

fn with_key() -> RevealParams<'static> {
    RevealParams::with_key(PrivateKeyPem::new(&keypair().private_key_pem))
}

fn cover(width: u32, height: u32, seed: u8) -> PixelBuffer {
    let data = (0..width as usize * height as usize * 4)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect();
    PixelBuffer::new(width, height, 4, data).unwrap()
}

fn fields(tag: u8) -> PrecomputedFields {
    PrecomputedFields::new(vec![tag; 24], vec![1; 12], vec![2; 16], vec![3; 256])
}

// ## 1️⃣ Round trips

    #[test]
    fn conceal_then_reveal_with_key() {
        let cfg = StegoConfig::default();
        let cover = cover(64, 64, 1);
        let params = ConcealParams::plaintext(b"the eagle lands at dawn", &keypair().public_key_pem);

        let concealed = conceal(&cover, &params, &cfg).unwrap();
        assert_eq!(concealed.stego.channel_plane(3), cover.channel_plane(3));
        assert!(concealed.telemetry.has_all_stages(&[
            Stage::Estimate,
            Stage::Encrypt,
            Stage::Wrap,
            Stage::Serialize,
            Stage::Embed,
        ]));
        assert!(concealed.telemetry.sanity_check());

        let revealed = reveal(&concealed.stego, &with_key(), &cfg).unwrap();
        assert_eq!(revealed.opened.mode(), EnvelopeMode::ServerEncrypted);
        assert_eq!(revealed.opened.plaintext_lossy().as_deref(), Some("the eagle lands at dawn"));
        assert_eq!(revealed.meta.bits_per_channel, concealed.embed.bits_per_channel);
        assert!(revealed.telemetry.has_all_stages(&[Stage::Extract, Stage::Parse, Stage::Unwrap, Stage::Decrypt]));
        assert_eq!(revealed.telemetry.counters.bytes_plaintext, 23);
    }

    #[test]
    fn reveal_without_key_returns_sealed_envelope() {
        let cfg = StegoConfig::default();
        let concealed = conceal(
            &cover(48, 48, 2),
            &ConcealParams::plaintext(b"sealed", &keypair().public_key_pem).with_depth(3),
            &cfg,
        )
        .unwrap();
        assert_eq!(concealed.embed.bits_per_channel, 3);
        assert!(!concealed.telemetry.stage_times.contains(Stage::Estimate));

        let revealed = reveal(&concealed.stego, &RevealParams::default(), &cfg).unwrap();
        assert!(!revealed.opened.is_decrypted());
        assert_eq!(revealed.opened.envelope.ciphertext.len(), 6);
        assert_eq!(revealed.meta.scan_depth, 3);
        assert!(!revealed.telemetry.stage_times.contains(Stage::Decrypt));
    }

    #[test]
    fn embed_only_fields_survive_unchanged() {
        let cfg = StegoConfig::default();
        let concealed = conceal(&cover(40, 40, 3), &ConcealParams::precomputed(fields(9)).with_depth(1), &cfg).unwrap();
        let revealed = reveal(&concealed.stego, &RevealParams::default(), &cfg).unwrap();
        let env = &revealed.opened.envelope;
        assert_eq!(env.mode, EnvelopeMode::EmbedOnly);
        assert_eq!(env.ciphertext, vec![9; 24]);
        assert_eq!(env.nonce, vec![1; 12]);
        assert_eq!(env.tag, vec![2; 16]);
        assert_eq!(env.wrapped_key, vec![3; 256]);
    }

    #[test]
    fn oaep_hash_comes_from_config() {
        let sha256 = StegoConfig { oaep_hash: OaepHash::Sha256, ..StegoConfig::default() };
        let params = ConcealParams::plaintext(b"hash pinned", &keypair().public_key_pem).with_depth(2);
        let concealed = conceal(&cover(48, 48, 11), &params, &sha256).unwrap();

        let revealed = reveal(&concealed.stego, &with_key(), &sha256).unwrap();
        assert_eq!(revealed.opened.plaintext_lossy().as_deref(), Some("hash pinned"));

        let err = reveal(&concealed.stego, &with_key(), &StegoConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyUnwrap);
    }

    #[test]
    fn config_sizes_generated_keys() {
        let cfg = StegoConfig::default();
        let kp = cfg.generate_keypair(None).unwrap();
        let public = parse_public_key_pem(&kp.public_key_pem).unwrap();
        assert_eq!(modulus_bits(&public), cfg.rsa_key_bits);

        let params = ConcealParams::plaintext(b"fresh", &kp.public_key_pem);
        let concealed = conceal(&cover(48, 48, 12), &params, &cfg).unwrap();
        let key = RevealParams::with_key(PrivateKeyPem::new(&kp.private_key_pem));
        let revealed = reveal(&concealed.stego, &key, &cfg).unwrap();
        assert_eq!(revealed.opened.plaintext_lossy().as_deref(), Some("fresh"));
    }

// ## 2️⃣ Error propagation

    #[test]
    fn small_cover_is_capacity_exceeded() {
        let err = conceal(
            &cover(8, 8, 4),
            &ConcealParams::plaintext(b"too big", &keypair().public_key_pem).with_depth(1),
            &StegoConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert!(matches!(err, StegoError::Codec(_)));
    }

    #[test]
    fn missing_key_and_bad_depth_fail_before_work() {
        let cfg = StegoConfig::default();
        let mut params = ConcealParams::plaintext(b"x", &keypair().public_key_pem);
        params.recipient_public_key_pem = None;
        let err = conceal(&cover(16, 16, 5), &params, &cfg).unwrap_err();
        assert!(matches!(err, StegoError::Envelope(EnvelopeError::MissingField("recipient_public_key"))));

        let err = conceal(&cover(16, 16, 5), &ConcealParams::precomputed(fields(1)).with_depth(7), &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDepth);

        let mut partial = fields(1);
        partial.wrapped_key = None;
        let err = conceal(&cover(64, 64, 5), &ConcealParams::precomputed(partial), &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn clean_image_has_no_payload() {
        let flat = PixelBuffer::filled(32, 32, &[0, 0, 0]).unwrap();
        let err = reveal(&flat, &with_key(), &StegoConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoPayloadFound);
    }

    #[test]
    fn embed_only_garbage_fails_at_unwrap() {
        let cfg = StegoConfig::default();
        let concealed = conceal(&cover(48, 48, 6), &ConcealParams::precomputed(fields(5)), &cfg).unwrap();
        let err = reveal(&concealed.stego, &with_key(), &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyUnwrap);
    }

    #[test]
    fn non_envelope_payload_is_malformed() {
        let (stego, _) = stegcrypt_core::bitplane::embed(&cover(16, 16, 7), b"plain bytes", Some(2)).unwrap();
        let err = reveal(&stego, &RevealParams::default(), &StegoConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEnvelope);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = StegoConfig::default();
        cfg.thresholds.depth_1_below = 99.0;
        let err = reveal(&cover(8, 8, 8), &RevealParams::default(), &cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn strict_scan_policy_flows_through_config() {
        let cfg = StegoConfig { scan: ScanPolicy::strict_truncation(), ..StegoConfig::default() };
        let concealed = conceal(&cover(40, 40, 9), &ConcealParams::precomputed(fields(2)).with_depth(2), &cfg).unwrap();
        let revealed = reveal(&concealed.stego, &RevealParams::default(), &cfg).unwrap();
        assert_eq!(revealed.meta.scan_depth, 2);
    }

// ## 3️⃣ Batch

    #[test]
    fn batch_conceal_matches_sequential() {
        let cfg = StegoConfig::default();
        let covers: Vec<PixelBuffer> = (0..6).map(|i| cover(32, 32, i)).collect();
        let jobs: Vec<ConcealJob<'_>> = covers
            .iter()
            .enumerate()
            .map(|(i, c)| ConcealJob { cover: c, params: ConcealParams::precomputed(fields(i as u8 + 1)).with_depth(2) })
            .collect();

        let parallel = conceal_batch(&jobs, &cfg, &ParallelismProfile::with_workers(3));
        assert_eq!(parallel.len(), jobs.len());
        for (job, out) in jobs.iter().zip(&parallel) {
            let sequential = conceal(job.cover, &job.params, &cfg).unwrap();
            let out = out.as_ref().unwrap();
            assert_eq!(out.stego, sequential.stego);
            assert_eq!(out.embed, sequential.embed);
        }
    }

    #[test]
    fn batch_reveal_keeps_input_order_and_errors() {
        let cfg = StegoConfig::default();
        let mut images: Vec<PixelBuffer> = (0..5u8)
            .map(|i| {
                conceal(&cover(32, 32, i), &ConcealParams::precomputed(fields(i + 10)).with_depth(2), &cfg)
                    .unwrap()
                    .stego
            })
            .collect();
        images.insert(2, PixelBuffer::filled(32, 32, &[0, 0, 0]).unwrap());

        let results = reveal_batch(&images, &RevealParams::default(), &cfg, &ParallelismProfile::with_workers(4));
        assert_eq!(results.len(), 6);
        assert_eq!(results[2].as_ref().unwrap_err().kind(), ErrorKind::NoPayloadFound);

        let tags: Vec<u8> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|r| r.opened.envelope.ciphertext[0])
            .collect();
        assert_eq!(tags, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn batch_with_key_decrypts_every_image() {
        let cfg = StegoConfig::default();
        let messages: [&[u8]; 3] = [b"one", b"two", b"three"];
        let images: Vec<PixelBuffer> = messages
            .iter()
            .map(|m| {
                let params = ConcealParams::plaintext(m, &keypair().public_key_pem);
                conceal(&cover(48, 48, m.len() as u8), &params, &cfg).unwrap().stego
            })
            .collect();

        let results = reveal_batch(&images, &with_key(), &cfg, &ParallelismProfile::dynamic());
        let plain: Vec<String> = results
            .into_iter()
            .map(|r| r.unwrap().opened.plaintext_lossy().unwrap())
            .collect();
        assert_eq!(plain, vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_batch_is_empty() {
        let cfg = StegoConfig::default();
        assert!(reveal_batch(&[], &RevealParams::default(), &cfg, &ParallelismProfile::single_threaded()).is_empty());
        assert!(conceal_batch(&[], &cfg, &ParallelismProfile::dynamic()).is_empty());
    }
}
