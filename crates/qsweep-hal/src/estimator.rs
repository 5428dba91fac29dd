//! Resource-estimation seam.
//!
//! The estimation service itself is external. This module defines what is
//! handed to it ([`EstimationRequest`]) and what comes back
//! ([`PhysicalEstimate`]), plus the [`ResourceEstimator`] trait a client for
//! the service implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use qsweep_ir::{Circuit, LogicalCounts};

use crate::error::HalResult;
use crate::profile::HardwareProfile;

/// Physical resources reported for one hardware profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalEstimate {
    /// Profile the estimate was computed for.
    pub profile: String,
    /// Total physical qubits, including magic-state factories.
    pub physical_qubits: u64,
    /// Estimated runtime in nanoseconds.
    pub runtime_ns: u64,
    /// Code distance chosen by the service, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_distance: Option<u32>,
}

/// Serializable hand-off payload for an estimation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    /// Request identifier.
    pub id: Uuid,
    /// Name of the circuit.
    pub circuit: String,
    /// Logical counts of the fully expanded circuit.
    pub counts: LogicalCounts,
    /// Profiles to estimate against.
    pub profiles: Vec<HardwareProfile>,
}

impl EstimationRequest {
    /// Build a request for `circuit` against `profiles`.
    ///
    /// Every profile is validated first.
    pub fn new(circuit: &Circuit, profiles: &[HardwareProfile]) -> HalResult<Self> {
        for profile in profiles {
            profile.validate()?;
        }
        let counts = circuit.logical_counts()?;
        let id = Uuid::new_v4();
        debug!(
            %id,
            circuit = circuit.name(),
            num_qubits = counts.num_qubits,
            total_ops = counts.total_ops,
            "built estimation request"
        );
        Ok(Self {
            id,
            circuit: circuit.name().to_string(),
            counts,
            profiles: profiles.to_vec(),
        })
    }

    /// Pretty-printed JSON payload.
    pub fn to_json(&self) -> HalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Client for an external resource-estimation service.
///
/// Implementations surface service failures as
/// [`HalError::UnsupportedCircuit`](crate::HalError::UnsupportedCircuit),
/// [`HalError::ServiceUnavailable`](crate::HalError::ServiceUnavailable) or
/// [`HalError::Estimator`](crate::HalError::Estimator), and never retry.
#[async_trait]
pub trait ResourceEstimator: Send + Sync {
    /// Name of the service.
    fn name(&self) -> &str;

    /// Estimate physical resources for `circuit` under each profile.
    async fn estimate(
        &self,
        circuit: Circuit,
        profiles: &[HardwareProfile],
    ) -> HalResult<Vec<PhysicalEstimate>>;
}
