//! Hardware profiles for resource estimation.

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Error-correction scheme assumed by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum QecScheme {
    /// Rotated surface code.
    SurfaceCode,
}

/// Physical assumptions handed to the estimator alongside a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    /// Profile name as understood by the estimation service.
    pub name: String,
    /// Error-correction scheme.
    pub qec_scheme: QecScheme,
    /// Physical error rate per gate.
    pub physical_error_rate: f64,
    /// Physical gate time in nanoseconds.
    pub gate_time_ns: f64,
    /// Total failure probability the estimate may spend.
    pub error_budget: f64,
}

impl HardwareProfile {
    /// Error budget shared by the standard profiles.
    pub const STANDARD_ERROR_BUDGET: f64 = 0.001;

    fn gate_based(name: &str, physical_error_rate: f64) -> Self {
        Self {
            name: name.into(),
            qec_scheme: QecScheme::SurfaceCode,
            physical_error_rate,
            gate_time_ns: 1.0,
            error_budget: Self::STANDARD_ERROR_BUDGET,
        }
    }

    /// Nanosecond gate-based qubits at a 1e-3 physical error rate.
    pub fn gate_ns_e3() -> Self {
        Self::gate_based("qubit_gate_ns_e3", 1e-3)
    }

    /// Nanosecond gate-based qubits at a 1e-4 physical error rate.
    pub fn gate_ns_e4() -> Self {
        Self::gate_based("qubit_gate_ns_e4", 1e-4)
    }

    /// Both standard profiles, e3 first.
    pub fn standard() -> Vec<Self> {
        vec![Self::gate_ns_e3(), Self::gate_ns_e4()]
    }

    /// Look up a standard profile by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "qubit_gate_ns_e3" | "e3" => Some(Self::gate_ns_e3()),
            "qubit_gate_ns_e4" | "e4" => Some(Self::gate_ns_e4()),
            _ => None,
        }
    }

    /// Check that every rate lies in (0, 1) and the gate time is positive.
    pub fn validate(&self) -> HalResult<()> {
        let in_unit = |v: f64| v > 0.0 && v < 1.0;
        if !in_unit(self.physical_error_rate) {
            return Err(HalError::Configuration(format!(
                "profile '{}': physical error rate {} outside (0, 1)",
                self.name, self.physical_error_rate
            )));
        }
        if !in_unit(self.error_budget) {
            return Err(HalError::Configuration(format!(
                "profile '{}': error budget {} outside (0, 1)",
                self.name, self.error_budget
            )));
        }
        if !(self.gate_time_ns > 0.0 && self.gate_time_ns.is_finite()) {
            return Err(HalError::Configuration(format!(
                "profile '{}': gate time must be positive",
                self.name
            )));
        }
        Ok(())
    }
}
