//! Execution mode selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HalError;

/// What the driver does with a built circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Run on a simulation backend and read out the measurement.
    #[default]
    Simulate,
    /// Hand the circuit to a resource estimator.
    Estimate,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Simulate => f.write_str("simulate"),
            ExecutionMode::Estimate => f.write_str("estimate"),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simulate" | "sim" => Ok(ExecutionMode::Simulate),
            "estimate" | "re" => Ok(ExecutionMode::Estimate),
            other => Err(HalError::Configuration(format!(
                "unknown execution mode '{other}' (expected simulate or estimate)"
            ))),
        }
    }
}
