//! Error types for the HAL crate.

use thiserror::Error;

/// Errors raised by backends and resource estimators.
///
/// Estimator failures are reported as they arrive; nothing in this crate
/// retries or reinterprets them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Backend is not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// The estimation service refused the circuit.
    #[error("Circuit not supported by estimator: {0}")]
    UnsupportedCircuit(String),

    /// The estimation service could not be reached.
    #[error("Estimation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The estimation service reported a failure.
    #[error("Estimator error: {0}")]
    Estimator(String),

    /// Hardware profile or backend settings are invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Circuit inspection failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qsweep_ir::IrError),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
