// ## src/telemetry/snapshot.rs

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{TelemetryTimer, StageTimes, Stage};

/// Immutable per-call telemetry: counters, ratios, and stage timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: TelemetryCounters,
    /// `bits_embedded / bits_capacity`, 0 when nothing was embedded.
    pub capacity_utilization: f64,
    /// `bytes_envelope / bytes_plaintext`, 0 without plaintext.
    pub envelope_expansion: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let capacity_utilization = if counters.bits_capacity > 0 {
            (counters.bits_embedded as f64 / counters.bits_capacity as f64).min(1.0)
        } else {
            0.0
        };
        let envelope_expansion = if counters.bytes_plaintext > 0 {
            counters.bytes_envelope as f64 / counters.bytes_plaintext as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            capacity_utilization,
            envelope_expansion,
            elapsed: timer.elapsed(),
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.stage_times.contains(*s))
    }

    /// Internal invariants:
    /// - utilization within [0, 1]
    /// - summed stage time never exceeds elapsed
    pub fn sanity_check(&self) -> bool {
        (0.0..=1.0).contains(&self.capacity_utilization)
            && self.total_stage_time() <= self.elapsed
    }
}
