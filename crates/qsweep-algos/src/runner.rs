//! Dispatch of a catalog entry to a backend or an estimator.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use qsweep_hal::{
    Backend, EstimationRequest, ExecutionMode, HalError, HardwareProfile, PhysicalEstimate,
    ResourceEstimator,
};

use crate::catalog::{Entry, Readout};
use crate::error::AlgoResult;

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RunReport {
    /// The circuit was simulated and read out.
    Simulate {
        /// Entry name.
        entry: String,
        /// Family readout of the measured bits.
        readout: Readout,
        /// Backend wall-clock time.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        execution_time_ms: Option<u64>,
    },
    /// The circuit was handed to a resource estimator.
    Estimate {
        /// Entry name.
        entry: String,
        /// One estimate per hardware profile.
        estimates: Vec<PhysicalEstimate>,
    },
}

/// Build `entry` and run it in `mode`.
///
/// Estimator failures are returned as they arrive, wrapped in
/// [`AlgoError::Hal`](crate::AlgoError::Hal); nothing is retried.
pub async fn run_entry(
    entry: &Entry,
    mode: ExecutionMode,
    backend: &dyn Backend,
    estimator: Option<&dyn ResourceEstimator>,
    profiles: &[HardwareProfile],
) -> AlgoResult<RunReport> {
    let circuit = entry.build()?;
    debug!(
        entry = %entry.name,
        %mode,
        num_qubits = circuit.num_qubits(),
        num_results = circuit.num_results(),
        "built circuit"
    );

    match mode {
        ExecutionMode::Simulate => {
            let result = backend.execute(circuit).await?;
            let readout = entry.readout(&result.outcome)?;
            info!(entry = %entry.name, backend = backend.name(), "simulation finished");
            Ok(RunReport::Simulate {
                entry: entry.name.clone(),
                readout,
                execution_time_ms: result.execution_time_ms,
            })
        }
        ExecutionMode::Estimate => {
            let estimator = estimator.ok_or_else(|| {
                HalError::ServiceUnavailable("no resource estimator configured".into())
            })?;
            for profile in profiles {
                profile.validate()?;
            }
            let estimates = estimator.estimate(circuit, profiles).await?;
            info!(
                entry = %entry.name,
                estimator = estimator.name(),
                profiles = estimates.len(),
                "estimation finished"
            );
            Ok(RunReport::Estimate {
                entry: entry.name.clone(),
                estimates,
            })
        }
    }
}

/// Hand-off payload for an external estimation service.
pub fn estimation_request(
    entry: &Entry,
    profiles: &[HardwareProfile],
) -> AlgoResult<EstimationRequest> {
    let circuit = entry.build()?;
    Ok(EstimationRequest::new(&circuit, profiles)?)
}
