//! Simulation backend trait.
//!
//! A [`Backend`] executes a finished circuit and reports the measurement
//! outcome:
//!
//! ```text
//!   capabilities() ──→ execute(circuit) ──→ ExecutionResult
//!    (sync, &ref)          (async)
//! ```
//!
//! The circuit is moved into `execute`; a circuit is executed at most once.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qsweep_ir::{Circuit, MeasurementOutcome};

use crate::error::HalResult;

/// Hardware capabilities of a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Maximum circuit width.
    pub num_qubits: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags such as `"statevector"` or `"mid_circuit_measurement"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local state-vector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            is_simulator: true,
            features: vec!["statevector".into(), "mid_circuit_measurement".into()],
        }
    }

    /// True if `feature` is advertised.
    pub fn supports(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Result of one circuit execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measured bits in recording order.
    pub outcome: MeasurementOutcome,
    /// Wall-clock execution time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Wrap a measurement outcome.
    pub fn new(outcome: MeasurementOutcome) -> Self {
        Self {
            outcome,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

/// Trait for backends that run a circuit and measure it.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    ///
    /// Synchronous and infallible; implementations cache capabilities at
    /// construction time.
    fn capabilities(&self) -> &Capabilities;

    /// Execute `circuit` once and return its measurement outcome.
    async fn execute(&self, circuit: Circuit) -> HalResult<ExecutionResult>;
}
