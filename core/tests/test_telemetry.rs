#[cfg(test)]
mod telemetry_snapshot_tests {
    use std::time::Duration;

    use stegcrypt_core::bitplane::{EmbedResult, ExtractMeta};
    use stegcrypt_core::telemetry::{Stage, StageTimes, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};

    fn make_counters() -> TelemetryCounters {
        let mut c = TelemetryCounters::default();
        c.add_seal(100, 100);
        c.add_envelope(500);
        c.add_embed(&EmbedResult { bits_per_channel: 2, capacity_bits: 8000, used_bits: 4048, used_bytes: 506 });
        c
    }

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(20)); // ensure elapsed > stage times
        timer.add_stage_time(Stage::Encrypt, Duration::from_millis(5));
        timer.add_stage_time(Stage::Embed, Duration::from_millis(10));
        timer.finish();
        timer
    }

    #[test]
    fn embed_counters_follow_result() {
        let c = make_counters();
        assert_eq!(c.bytes_plaintext, 100);
        assert_eq!(c.bytes_ciphertext, 100);
        assert_eq!(c.bytes_envelope, 500);
        assert_eq!(c.bytes_header, 6);
        assert_eq!(c.bits_embedded, 4048);
        assert_eq!(c.bits_capacity, 8000);
        assert_eq!(c.samples_touched, 2024);
    }

    #[test]
    fn extract_counts_probes_up_to_scan_depth() {
        let mut c = TelemetryCounters::default();
        c.add_extract(&ExtractMeta { bits_per_channel: 3, payload_length: 10, scan_depth: 3 });
        assert_eq!(c.depth_probes, 3);
        assert_eq!(c.bits_embedded, 128);
        assert_eq!(c.samples_touched, 43);
    }

    #[test]
    fn ratios_are_derived_from_counters() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer());
        assert!((snapshot.capacity_utilization - 0.506).abs() < 1e-9);
        assert!((snapshot.envelope_expansion - 5.0).abs() < 1e-9);
    }

    #[test]
    fn ratios_are_zero_without_work() {
        let snapshot = TelemetrySnapshot::from(&TelemetryCounters::default(), &make_timer());
        assert_eq!(snapshot.capacity_utilization, 0.0);
        assert_eq!(snapshot.envelope_expansion, 0.0);
    }

    #[test]
    fn sanity_check_passes_for_consistent_snapshot() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer());
        assert!(snapshot.sanity_check());
        assert_eq!(snapshot.total_stage_time(), Duration::from_millis(15));
        assert!(snapshot.has_all_stages(&[Stage::Encrypt, Stage::Embed]));
        assert!(!snapshot.has_all_stages(&[Stage::Decrypt]));
    }

    #[test]
    fn sanity_check_fails_when_stages_exceed_elapsed() {
        let mut timer = TelemetryTimer::new();
        timer.finish();
        timer.add_stage_time(Stage::Extract, Duration::from_secs(60));
        let snapshot = TelemetrySnapshot::from(&make_counters(), &timer);
        assert!(!snapshot.sanity_check());
    }

    #[test]
    fn stage_times_accumulate() {
        let mut times = StageTimes::default();
        times.add(Stage::Unwrap, Duration::from_micros(300));
        times.add(Stage::Unwrap, Duration::from_micros(200));
        assert_eq!(times.get(Stage::Unwrap), Duration::from_micros(500));
        assert!((times.get_us(Stage::Unwrap) - 500.0).abs() < 1e-6);
        assert_eq!(times.get(Stage::Parse), Duration::ZERO);
        assert_eq!((&times).into_iter().count(), 1);
    }

    #[test]
    fn timer_time_charges_the_stage() {
        let mut timer = TelemetryTimer::new();
        let v = timer.time(Stage::Estimate, || {
            std::thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(v, 7);
        assert!(timer.stage_times.get(Stage::Estimate) >= Duration::from_millis(2));
    }

    #[test]
    fn merge_adds_all_fields() {
        let mut a = make_counters();
        a += make_counters();
        assert_eq!(a.bits_embedded, 8096);
        assert_eq!(a.bytes_header, 12);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snapshot = TelemetrySnapshot::from(&make_counters(), &make_timer());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"bits_embedded\":4048"));
        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, snapshot.counters);
    }

    #[test]
    fn stage_names_are_lowercase() {
        assert_eq!(Stage::Serialize.to_string(), "serialize");
        assert_eq!(Stage::Decrypt.to_string(), "decrypt");
    }
}
