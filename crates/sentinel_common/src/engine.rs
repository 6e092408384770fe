//! Engine - Owns the live diagnostics state and the action handlers
//!
//! Single mutable owner, driven from the event loop: the periodic tick feeds
//! new readings in, the rotation sub-tick animates key rotation, and threat
//! injection overlays a degraded reading. No locks; callers hold `&mut` and
//! every method runs to completion before the next timer fires.

use crate::diagnostics::{evaluate, AlertFlags, Reading};
use crate::history::{HistoryPoint, RollingHistory};
use crate::telemetry::{SystemMetrics, TelemetryGenerator};
use crate::threats::{VulnerabilityDetail, THREAT_CATALOG};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Total duration of the key-rotation animation
pub const ROTATION_DURATION: Duration = Duration::from_millis(2500);

/// Sub-tick interval while rotating
pub const ROTATION_SUBTICK: Duration = Duration::from_millis(50);

/// Progress gained per sub-tick (linear 0 → 100 over the full duration)
pub const ROTATION_STEP: f64 =
    100.0 / (ROTATION_DURATION.as_millis() as f64 / ROTATION_SUBTICK.as_millis() as f64);

/// Key-rotation phase
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotationState {
    #[default]
    Idle,
    Rotating {
        progress: f64,
    },
}

/// Live dashboard state
#[derive(Debug)]
pub struct DiagnosticsEngine {
    reading: Reading,
    metrics: SystemMetrics,
    decay_history: RollingHistory,
    packet_history: RollingHistory,
    rotation: RotationState,
    latest_threat: Option<VulnerabilityDetail>,
    generator: TelemetryGenerator,
}

impl DiagnosticsEngine {
    /// Engine with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_generator(TelemetryGenerator::new())
    }

    /// Deterministic engine for simulations and tests
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(TelemetryGenerator::with_seed(seed))
    }

    fn with_generator(generator: TelemetryGenerator) -> Self {
        Self {
            reading: Reading::baseline(),
            metrics: SystemMetrics::default(),
            decay_history: RollingHistory::new(),
            packet_history: RollingHistory::new(),
            rotation: RotationState::Idle,
            latest_threat: None,
            generator,
        }
    }

    /// One generator tick: resample the reading and metrics, extend the charts
    ///
    /// Suspended while a rotation is in progress; the rotation sub-tick owns
    /// the history during that window.
    pub fn tick(&mut self) {
        if self.is_rotating() {
            return;
        }

        self.reading = self.generator.next_reading(&self.reading);
        self.metrics = self.generator.next_metrics();
        self.decay_history
            .push(HistoryPoint::now(self.reading.entanglement_decay));
        let packet = self.generator.packet_value();
        self.packet_history.push(HistoryPoint::now(packet));

        debug!(
            decay = self.reading.entanglement_decay,
            integrity = self.reading.integrity_score,
            "telemetry tick"
        );
    }

    /// Begin a key rotation
    ///
    /// Returns false while one is already in progress (no state change, no
    /// extra timers). On entry the displayed threat is cleared and normal
    /// ticking stops until completion.
    pub fn start_rotation(&mut self) -> bool {
        if self.is_rotating() {
            return false;
        }

        self.latest_threat = None;
        self.rotation = RotationState::Rotating { progress: 0.0 };
        info!("key rotation started");
        true
    }

    /// One rotation sub-tick: advance progress and append a noisy chart point
    ///
    /// Returns true on the sub-tick that completes the rotation. Completion
    /// atomically installs the stabilized reading and resumes normal ticking.
    pub fn rotation_tick(&mut self) -> bool {
        let RotationState::Rotating { progress } = self.rotation else {
            return false;
        };

        let noise = self.generator.rotation_noise();
        self.decay_history.push(HistoryPoint::now(noise));

        let progress = (progress + ROTATION_STEP).min(100.0);
        if progress >= 100.0 {
            self.reading = Reading::stabilized(self.reading.key_strength);
            self.rotation = RotationState::Idle;
            info!("key rotation complete, link stabilized");
            true
        } else {
            self.rotation = RotationState::Rotating { progress };
            false
        }
    }

    /// Inject one threat from the catalog
    ///
    /// Ignored while rotating. Otherwise picks a catalog entry uniformly,
    /// stamps it, overlays the reading with a degraded state, and returns the
    /// stamped detail (also kept as the displayed latest threat).
    pub fn inject_threat(&mut self) -> Option<VulnerabilityDetail> {
        if self.is_rotating() {
            return None;
        }

        let profile = &THREAT_CATALOG[self.generator.pick_index(THREAT_CATALOG.len())];
        let detail = VulnerabilityDetail::stamped(profile);

        self.reading.integrity_score = self.generator.degraded_integrity();
        self.reading.entanglement_decay = self.generator.degraded_decay();
        self.reading.push_vulnerability(detail.name.clone());
        self.latest_threat = Some(detail.clone());

        info!(threat = %detail.name, "threat injected");
        Some(detail)
    }

    /// Latest reading
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    /// Latest header metrics
    pub fn metrics(&self) -> &SystemMetrics {
        &self.metrics
    }

    /// Alert flags for the latest reading
    pub fn alerts(&self) -> AlertFlags {
        evaluate(&self.reading)
    }

    /// Decay chart window
    pub fn decay_history(&self) -> &RollingHistory {
        &self.decay_history
    }

    /// Packet chart window
    pub fn packet_history(&self) -> &RollingHistory {
        &self.packet_history
    }

    /// Whether a rotation is in progress
    pub fn is_rotating(&self) -> bool {
        matches!(self.rotation, RotationState::Rotating { .. })
    }

    /// Rotation progress in [0, 100], if rotating
    pub fn rotation_progress(&self) -> Option<f64> {
        match self.rotation {
            RotationState::Rotating { progress } => Some(progress),
            RotationState::Idle => None,
        }
    }

    /// Most recently injected threat, until replaced or cleared by rotation
    pub fn latest_threat(&self) -> Option<&VulnerabilityDetail> {
        self.latest_threat.as_ref()
    }

    /// Serializable view of the current state (simulation reports)
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            reading: self.reading.clone(),
            alerts: self.alerts(),
            metrics: self.metrics,
            rotation_progress: self.rotation_progress(),
            latest_threat: self.latest_threat.clone(),
        }
    }
}

impl Default for DiagnosticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the engine, serialized into simulation reports
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    pub reading: Reading,
    pub alerts: AlertFlags,
    pub metrics: SystemMetrics,
    pub rotation_progress: Option<f64>,
    pub latest_threat: Option<VulnerabilityDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{STABILIZED_LABEL, MAX_ACTIVE_VULNERABILITIES};

    fn complete_rotation(engine: &mut DiagnosticsEngine) {
        let mut subticks = 0;
        while !engine.rotation_tick() {
            subticks += 1;
            assert!(subticks < 1000, "rotation never completed");
        }
    }

    #[test]
    fn test_tick_extends_both_charts() {
        let mut engine = DiagnosticsEngine::with_seed(1);
        for _ in 0..5 {
            engine.tick();
        }
        assert_eq!(engine.decay_history().len(), 5);
        assert_eq!(engine.packet_history().len(), 5);
        assert_eq!(
            engine.decay_history().latest().unwrap().value,
            engine.reading().entanglement_decay
        );
    }

    #[test]
    fn test_tick_suspended_while_rotating() {
        let mut engine = DiagnosticsEngine::with_seed(2);
        engine.tick();
        let reading_before = engine.reading().clone();

        assert!(engine.start_rotation());
        engine.tick();
        assert_eq!(engine.reading(), &reading_before);
    }

    #[test]
    fn test_start_rotation_twice_is_noop() {
        let mut engine = DiagnosticsEngine::with_seed(3);
        assert!(engine.start_rotation());
        let progress_before = engine.rotation_progress();
        assert!(!engine.start_rotation());
        assert_eq!(engine.rotation_progress(), progress_before);
    }

    #[test]
    fn test_rotation_completes_to_stabilized_reading() {
        let mut engine = DiagnosticsEngine::with_seed(4);
        engine.tick();
        let key_strength = engine.reading().key_strength;

        assert!(engine.start_rotation());
        complete_rotation(&mut engine);

        assert!(!engine.is_rotating());
        let reading = engine.reading();
        assert_eq!(reading.integrity_score, 100.00);
        assert_eq!(reading.entanglement_decay, 0.001);
        assert_eq!(reading.noise_level, 0.002);
        assert_eq!(reading.key_strength, key_strength);
        assert_eq!(
            reading.active_vulnerabilities,
            vec![STABILIZED_LABEL.to_string()]
        );
        assert!(!engine.alerts().alert);
    }

    #[test]
    fn test_rotation_duration_in_subticks() {
        let mut engine = DiagnosticsEngine::with_seed(5);
        engine.start_rotation();

        let mut subticks = 1;
        while !engine.rotation_tick() {
            subticks += 1;
        }
        // 2.5 s at 50 ms per step
        assert_eq!(subticks, 50);
    }

    #[test]
    fn test_rotation_appends_noisy_points() {
        let mut engine = DiagnosticsEngine::with_seed(6);
        engine.start_rotation();
        for _ in 0..10 {
            engine.rotation_tick();
        }
        assert_eq!(engine.decay_history().len(), 10);
    }

    #[test]
    fn test_rotation_clears_displayed_threat() {
        let mut engine = DiagnosticsEngine::with_seed(7);
        engine.inject_threat().unwrap();
        assert!(engine.latest_threat().is_some());

        engine.start_rotation();
        assert!(engine.latest_threat().is_none());
    }

    #[test]
    fn test_injection_overlays_degraded_state() {
        let mut engine = DiagnosticsEngine::with_seed(8);
        engine.tick();

        let detail = engine.inject_threat().unwrap();
        let reading = engine.reading();

        assert_eq!(reading.active_vulnerabilities[0], detail.name);
        assert!(reading.active_vulnerabilities.len() <= MAX_ACTIVE_VULNERABILITIES);
        assert!((95.0..98.0).contains(&reading.integrity_score));
        assert!((0.12..0.22).contains(&reading.entanglement_decay));
        assert!(engine.alerts().alert);
        assert_eq!(engine.latest_threat().unwrap(), &detail);
    }

    #[test]
    fn test_injection_while_rotating_is_noop() {
        let mut engine = DiagnosticsEngine::with_seed(9);
        engine.start_rotation();
        let reading_before = engine.reading().clone();

        assert!(engine.inject_threat().is_none());
        assert_eq!(engine.reading(), &reading_before);
        assert!(engine.latest_threat().is_none());
    }

    #[test]
    fn test_second_injection_replaces_latest_threat() {
        let mut engine = DiagnosticsEngine::with_seed(10);
        let first = engine.inject_threat().unwrap();
        let second = engine.inject_threat().unwrap();

        assert_eq!(engine.latest_threat().unwrap(), &second);
        // Both names are on the list, newest first
        assert_eq!(engine.reading().active_vulnerabilities[0], second.name);
        assert_eq!(engine.reading().active_vulnerabilities[1], first.name);
    }

    #[test]
    fn test_repeated_injections_respect_cap() {
        let mut engine = DiagnosticsEngine::with_seed(11);
        for _ in 0..10 {
            engine.inject_threat().unwrap();
            assert!(
                engine.reading().active_vulnerabilities.len() <= MAX_ACTIVE_VULNERABILITIES
            );
        }
    }

    #[test]
    fn test_history_cap_holds_across_mixed_activity() {
        let mut engine = DiagnosticsEngine::with_seed(12);
        for _ in 0..30 {
            engine.tick();
        }
        engine.start_rotation();
        complete_rotation(&mut engine);
        for _ in 0..30 {
            engine.tick();
        }

        assert_eq!(engine.decay_history().len(), engine.decay_history().cap());
        assert_eq!(engine.packet_history().len(), engine.packet_history().cap());
    }
}
