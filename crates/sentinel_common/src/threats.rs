//! Threats - Static vulnerability catalog for injected-threat display
//!
//! Five fixed narrative entries. Injection copies one verbatim and stamps it
//! with the wall-clock time; nothing here is ever synthesized or mutated.

use serde::{Deserialize, Serialize};

/// One catalog entry (static narrative text)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreatProfile {
    /// Short display name, also prepended to the vulnerability list
    pub name: &'static str,

    /// Narrative impact description
    pub impact: &'static str,

    /// Narrative origin description
    pub origin: &'static str,
}

/// The fixed threat catalog
pub const THREAT_CATALOG: [ThreatProfile; 5] = [
    ThreatProfile {
        name: "Shor Resonance Probe",
        impact: "Factorization attempt against the active key lattice",
        origin: "Relay cluster 7G, unregistered endpoint",
    },
    ThreatProfile {
        name: "Decoherence Cascade",
        impact: "Induced phase collapse across entangled channel pairs",
        origin: "Upstream repeater, thermal signature anomaly",
    },
    ThreatProfile {
        name: "Phase Shift Injection",
        impact: "Forged interference pattern in the calibration stream",
        origin: "Spoofed beacon on maintenance band",
    },
    ThreatProfile {
        name: "Entanglement Siphon",
        impact: "Passive key-material exfiltration via ancilla leakage",
        origin: "Compromised metrology node",
    },
    ThreatProfile {
        name: "Lattice Echo Replay",
        impact: "Stale handshake replayed against the rotation window",
        origin: "Archived capture, origin grid unknown",
    },
];

/// A catalog entry stamped at injection time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityDetail {
    pub name: String,
    pub impact: String,
    pub origin: String,

    /// Wall-clock time of the injection, local `HH:MM:SS`
    pub timestamp: String,
}

impl VulnerabilityDetail {
    /// Stamp a catalog entry with the current wall-clock time
    pub fn stamped(profile: &ThreatProfile) -> Self {
        Self::stamped_at(profile, chrono::Local::now().format("%H:%M:%S").to_string())
    }

    /// Stamp a catalog entry with an explicit timestamp
    pub fn stamped_at(profile: &ThreatProfile, timestamp: String) -> Self {
        Self {
            name: profile.name.to_string(),
            impact: profile.impact.to_string(),
            origin: profile.origin.to_string(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_exactly_five_entries() {
        assert_eq!(THREAT_CATALOG.len(), 5);
    }

    #[test]
    fn test_catalog_names_are_unique() {
        for (i, a) in THREAT_CATALOG.iter().enumerate() {
            for b in &THREAT_CATALOG[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_stamped_detail_is_verbatim() {
        let profile = &THREAT_CATALOG[2];
        let detail = VulnerabilityDetail::stamped_at(profile, "12:00:00".to_string());
        assert_eq!(detail.name, profile.name);
        assert_eq!(detail.impact, profile.impact);
        assert_eq!(detail.origin, profile.origin);
        assert_eq!(detail.timestamp, "12:00:00");
    }
}
