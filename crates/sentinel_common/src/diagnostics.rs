//! Diagnostics - Quantum-link reading and threshold evaluation
//!
//! A `Reading` is one synthetic snapshot of the encryption link. Alert state
//! is never stored: it is re-derived from the latest reading every time via
//! `evaluate`, so the panel can never disagree with the numbers it shows.

use serde::{Deserialize, Serialize};

/// Integrity scores below this are flagged as a breach
pub const INTEGRITY_THRESHOLD: f64 = 98.0;

/// Decay rates above this are flagged as overflow
pub const DECAY_THRESHOLD: f64 = 0.15;

/// At most this many vulnerability labels are kept, most recent first
pub const MAX_ACTIVE_VULNERABILITIES: usize = 4;

/// Baseline key strength in qubits
pub const BASELINE_KEY_STRENGTH: u32 = 8192;

/// Label shown after a completed key rotation
pub const STABILIZED_LABEL: &str = "COHERENCE_STABILIZED";

/// One snapshot of the synthetic link diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Key strength in qubits (baseline 8192, drifts ±1 occasionally)
    pub key_strength: u32,

    /// Entanglement decay in %/s, sampled from [0, 0.2]
    pub entanglement_decay: f64,

    /// Channel noise level, sampled from [0, 0.12]
    pub noise_level: f64,

    /// Link integrity in percent, sampled from [95, 100.5]
    pub integrity_score: f64,

    /// Vulnerability labels, most recent first, capped at 4
    pub active_vulnerabilities: Vec<String>,
}

impl Reading {
    /// Reading shown before the first generator tick
    pub fn baseline() -> Self {
        Self {
            key_strength: BASELINE_KEY_STRENGTH,
            entanglement_decay: 0.042,
            noise_level: 0.12,
            integrity_score: 99.85,
            active_vulnerabilities: vec![
                "Coherence Drift".to_string(),
                "Phase Shift Noise".to_string(),
            ],
        }
    }

    /// Reading produced by a completed key rotation
    ///
    /// The vulnerability list intentionally becomes the single stabilized
    /// label rather than an empty list.
    pub fn stabilized(key_strength: u32) -> Self {
        Self {
            key_strength,
            entanglement_decay: 0.001,
            noise_level: 0.002,
            integrity_score: 100.00,
            active_vulnerabilities: vec![STABILIZED_LABEL.to_string()],
        }
    }

    /// Prepend a vulnerability label, dropping the oldest past the cap
    pub fn push_vulnerability(&mut self, name: impl Into<String>) {
        self.active_vulnerabilities.insert(0, name.into());
        self.active_vulnerabilities.truncate(MAX_ACTIVE_VULNERABILITIES);
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Alert flags derived from a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFlags {
    /// Integrity below `INTEGRITY_THRESHOLD`
    pub critical_integrity: bool,

    /// Decay above `DECAY_THRESHOLD`
    pub critical_decay: bool,

    /// Either of the above
    pub alert: bool,
}

impl AlertFlags {
    /// Flags for a fully healthy reading
    pub fn clear() -> Self {
        Self {
            critical_integrity: false,
            critical_decay: false,
            alert: false,
        }
    }
}

/// Derive alert flags from a reading
///
/// Pure and total: same reading in, same flags out, nothing mutated.
pub fn evaluate(reading: &Reading) -> AlertFlags {
    let critical_integrity = reading.integrity_score < INTEGRITY_THRESHOLD;
    let critical_decay = reading.entanglement_decay > DECAY_THRESHOLD;

    AlertFlags {
        critical_integrity,
        critical_decay,
        alert: critical_integrity || critical_decay,
    }
}
