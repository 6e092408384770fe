//! Scripts - Embedded snippets with choreographed "execution" status
//!
//! The two bundled sources are display material: nothing ever interprets
//! them. Running a script walks its status through IDLE → RUNNING → SUCCESS →
//! IDLE on fixed deadlines, one independent machine per script id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Delay from RUNNING to SUCCESS
pub const RUNNING_DELAY: Duration = Duration::from_secs(1);

/// Hold time on SUCCESS before returning to IDLE
pub const SUCCESS_HOLD: Duration = Duration::from_secs(3);

/// Display status of one script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptStatus {
    #[default]
    Idle,
    Running,
    Success,
}

impl ScriptStatus {
    /// Label shown in the scripts panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
        }
    }
}

/// One embedded script (static metadata and source text)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptMetadata {
    pub id: &'static str,
    pub filename: &'static str,
    pub language: &'static str,
    pub content: &'static str,
}

/// The bundled display scripts
pub const EMBEDDED_SCRIPTS: [ScriptMetadata; 2] = [
    ScriptMetadata {
        id: "neural_bridge",
        filename: "bridge.php",
        language: "PHP",
        content: r#"<?php
// Neural Mesh Bridge - Legacy Protocol
header('Content-Type: application/json');

$node_id = $_GET['node_id'] ?? 'LOCAL_ROOT';
$entropy = bin2hex(random_bytes(16));

echo json_encode([
    'status' => 'CONNECTED',
    'protocol' => 'HEURISTIC_PHASE_v1.0',
    'entropy_seed' => $entropy,
    'last_sync' => date('Y-m-d H:i:s'),
    'integrity_check' => 'PASSED'
]);
?>
"#,
    },
    ScriptMetadata {
        id: "pattern_analysis",
        filename: "pattern_analysis.py",
        language: "Python",
        content: r#"import qiskit as q
from qiskit_ibm_runtime import QiskitRuntimeService

circuit = q.QuantumCircuit(2, 2)
circuit.h(0)
circuit.cx(0, 1)
circuit.measure([0,1], [0,1])

job = q.execute(circuit, backend='simulator', shots=1024)
print(f"Intelligence Pattern Results: {job.result()}")
"#,
    },
];

/// Look up an embedded script by id
pub fn script_by_id(id: &str) -> Option<&'static ScriptMetadata> {
    EMBEDDED_SCRIPTS.iter().find(|s| s.id == id)
}

#[derive(Debug, Clone, Copy)]
struct ScriptState {
    status: ScriptStatus,
    deadline: Option<Instant>,
}

/// Independent status machines, keyed by script id
#[derive(Debug)]
pub struct ScriptRunner {
    states: HashMap<&'static str, ScriptState>,
}

impl ScriptRunner {
    /// All embedded scripts, all IDLE
    pub fn new() -> Self {
        let states = EMBEDDED_SCRIPTS
            .iter()
            .map(|s| {
                (
                    s.id,
                    ScriptState {
                        status: ScriptStatus::Idle,
                        deadline: None,
                    },
                )
            })
            .collect();
        Self { states }
    }

    /// Trigger a script now
    pub fn execute(&mut self, id: &str) -> bool {
        self.execute_at(id, Instant::now())
    }

    /// Trigger a script at an explicit instant
    ///
    /// Returns false (and changes nothing) for unknown ids or scripts that
    /// are already mid-sequence.
    pub fn execute_at(&mut self, id: &str, now: Instant) -> bool {
        let Some(state) = self.states.get_mut(id) else {
            return false;
        };
        if state.status != ScriptStatus::Idle {
            return false;
        }

        state.status = ScriptStatus::Running;
        state.deadline = Some(now + RUNNING_DELAY);
        debug!(script = %id, "script execution started");
        true
    }

    /// Advance every machine whose deadline has passed
    pub fn poll(&mut self) {
        self.poll_at(Instant::now());
    }

    /// Advance machines against an explicit instant
    pub fn poll_at(&mut self, now: Instant) {
        for (id, state) in self.states.iter_mut() {
            let Some(deadline) = state.deadline else {
                continue;
            };
            if now < deadline {
                continue;
            }

            match state.status {
                ScriptStatus::Running => {
                    state.status = ScriptStatus::Success;
                    state.deadline = Some(deadline + SUCCESS_HOLD);
                    debug!(script = %id, "script execution succeeded");
                }
                ScriptStatus::Success => {
                    state.status = ScriptStatus::Idle;
                    state.deadline = None;
                    debug!(script = %id, "script returned to idle");
                }
                ScriptStatus::Idle => {
                    state.deadline = None;
                }
            }
        }
    }

    /// Current status of one script (IDLE for unknown ids)
    pub fn status(&self, id: &str) -> ScriptStatus {
        self.states
            .get(id)
            .map(|s| s.status)
            .unwrap_or(ScriptStatus::Idle)
    }

    /// Whether any script is mid-sequence
    pub fn any_active(&self) -> bool {
        self.states
            .values()
            .any(|s| s.status != ScriptStatus::Idle)
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new()
    }
}
