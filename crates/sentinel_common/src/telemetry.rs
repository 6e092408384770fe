//! Telemetry - Synthetic sampling for the dashboard panels
//!
//! All numbers on screen come from here. Nothing is measured; every field is
//! drawn uniformly from its documented range on each generator tick. The RNG
//! is owned and seedable so simulations and tests are reproducible.

use crate::diagnostics::{Reading, BASELINE_KEY_STRENGTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Probability per tick that the key strength drifts ±1 qubit
pub const KEY_DRIFT_PROBABILITY: f64 = 0.05;

/// Default generator tick interval in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1500;

/// Header metrics: the coarse host panel next to the link diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// CPU load percent, [0, 100)
    pub cpu: u8,

    /// Memory allocation percent, [60, 80)
    pub memory: u8,

    /// Network throughput percent, [10, 90)
    pub network: u8,

    /// Quantum stability percent, [99.8, 100.0)
    pub quantum_stability: f64,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            cpu: 45,
            memory: 62,
            network: 12,
            quantum_stability: 99.9,
        }
    }
}

/// Uniform sampler behind the generator tick
#[derive(Debug)]
pub struct TelemetryGenerator {
    rng: StdRng,
}

impl TelemetryGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for simulations and tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample the next reading
    ///
    /// Numeric fields are resampled independently; the vulnerability list is
    /// carried over unchanged (only actions rewrite it). Key strength stays
    /// at the baseline except for an occasional ±1 drift.
    pub fn next_reading(&mut self, prev: &Reading) -> Reading {
        let drift: i32 = if self.rng.gen_bool(KEY_DRIFT_PROBABILITY) {
            if self.rng.gen_bool(0.5) {
                1
            } else {
                -1
            }
        } else {
            0
        };

        Reading {
            key_strength: BASELINE_KEY_STRENGTH.saturating_add_signed(drift),
            entanglement_decay: round3(self.rng.gen_range(0.0..=0.2)),
            noise_level: round3(self.rng.gen_range(0.0..=0.12)),
            integrity_score: round2(self.rng.gen_range(95.0..=100.5)),
            active_vulnerabilities: prev.active_vulnerabilities.clone(),
        }
    }

    /// Sample the next header metrics
    pub fn next_metrics(&mut self) -> SystemMetrics {
        SystemMetrics {
            cpu: self.rng.gen_range(0..100),
            memory: self.rng.gen_range(60..80),
            network: self.rng.gen_range(10..90),
            quantum_stability: 99.8 + self.rng.gen::<f64>() * 0.2,
        }
    }

    /// Sample one packet-analysis chart value, [30, 70)
    pub fn packet_value(&mut self) -> f64 {
        self.rng.gen_range(30..70) as f64
    }

    /// Sample one noisy decay point for the rotation animation
    pub fn rotation_noise(&mut self) -> f64 {
        round3(self.rng.gen_range(0.0..=0.2))
    }

    /// Degraded integrity after a threat injection, [95, 98)
    ///
    /// Unrounded: staying strictly under the integrity threshold is what
    /// guarantees the injected overlay trips the alert.
    pub fn degraded_integrity(&mut self) -> f64 {
        self.rng.gen_range(95.0..98.0)
    }

    /// Degraded decay after a threat injection, [0.12, 0.22)
    ///
    /// May exceed the generator's own 0.2 ceiling; the chart clamps it.
    pub fn degraded_decay(&mut self) -> f64 {
        self.rng.gen_range(0.12..0.22)
    }

    /// Uniform index into a catalog of `len` entries
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl Default for TelemetryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::evaluate;

    #[test]
    fn test_readings_stay_in_range() {
        let mut generator = TelemetryGenerator::with_seed(7);
        let mut reading = Reading::baseline();

        for _ in 0..2000 {
            reading = generator.next_reading(&reading);
            assert!((0.0..=0.2).contains(&reading.entanglement_decay));
            assert!((0.0..=0.12).contains(&reading.noise_level));
            assert!((95.0..=100.5).contains(&reading.integrity_score));
            assert!(reading.key_strength.abs_diff(BASELINE_KEY_STRENGTH) <= 1);
        }
    }

    #[test]
    fn test_key_strength_drifts_occasionally() {
        let mut generator = TelemetryGenerator::with_seed(11);
        let mut reading = Reading::baseline();
        let mut drifted = 0usize;

        for _ in 0..2000 {
            reading = generator.next_reading(&reading);
            if reading.key_strength != BASELINE_KEY_STRENGTH {
                drifted += 1;
            }
        }

        // p = 0.05 per tick: expect roughly 100 of 2000, and never the majority
        assert!(drifted > 20, "drift never happened ({} of 2000)", drifted);
        assert!(drifted < 400, "drift far too frequent ({} of 2000)", drifted);
    }

    #[test]
    fn test_vulnerabilities_carried_over() {
        let mut generator = TelemetryGenerator::with_seed(3);
        let mut reading = Reading::baseline();
        reading.active_vulnerabilities = vec!["Lattice Echo".to_string()];

        let next = generator.next_reading(&reading);
        assert_eq!(next.active_vulnerabilities, reading.active_vulnerabilities);
    }

    #[test]
    fn test_metrics_stay_in_range() {
        let mut generator = TelemetryGenerator::with_seed(23);
        for _ in 0..500 {
            let metrics = generator.next_metrics();
            assert!(metrics.cpu < 100);
            assert!((60..80).contains(&metrics.memory));
            assert!((10..90).contains(&metrics.network));
            assert!((99.8..100.0).contains(&metrics.quantum_stability));

            let packet = generator.packet_value();
            assert!((30.0..70.0).contains(&packet));
        }
    }

    #[test]
    fn test_degraded_overlay_ranges() {
        let mut generator = TelemetryGenerator::with_seed(42);
        for _ in 0..500 {
            let integrity = generator.degraded_integrity();
            let decay = generator.degraded_decay();
            assert!((95.0..98.0).contains(&integrity));
            assert!((0.12..0.22).contains(&decay));

            // Every degraded overlay must trip the alert
            let mut reading = Reading::baseline();
            reading.integrity_score = integrity;
            reading.entanglement_decay = decay;
            assert!(evaluate(&reading).alert);
        }
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let mut a = TelemetryGenerator::with_seed(99);
        let mut b = TelemetryGenerator::with_seed(99);
        let baseline = Reading::baseline();

        for _ in 0..50 {
            assert_eq!(a.next_reading(&baseline), b.next_reading(&baseline));
        }
    }
}
