//! Sentinel Common - Shared types and the diagnostics engine
//!
//! Everything the console renders comes out of this crate: the synthetic
//! telemetry generator, the threshold evaluator, the rotation and
//! threat-injection handlers, the script status machines, and the intel
//! (chat) client. No panel state lives anywhere else.

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod history;
pub mod intel;
pub mod scripts;
pub mod telemetry;
pub mod threats;

pub use config::{IntelConfig, SentinelConfig};
pub use diagnostics::{evaluate, AlertFlags, Reading};
pub use engine::DiagnosticsEngine;
pub use history::{HistoryPoint, RollingHistory};
pub use intel::IntelClient;
pub use scripts::{ScriptMetadata, ScriptRunner, ScriptStatus};
pub use telemetry::{SystemMetrics, TelemetryGenerator};
pub use threats::{VulnerabilityDetail, THREAT_CATALOG};
