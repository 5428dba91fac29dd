//! Error types for the sim crate.

use qsweep_ir::{ErrorKind, IrError};
use thiserror::Error;

/// Errors produced by Heisenberg time-evolution synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// `total_time / dt` does not fit in a step count.
    #[error("total_time {total_time} / dt {dt} needs more Trotter steps than can be counted")]
    TooManySteps {
        /// Requested evolution time.
        total_time: f64,
        /// Requested step size.
        dt: f64,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),
}

impl SimError {
    /// Classify the failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::TooManySteps { .. } => ErrorKind::Parameter,
            SimError::Ir(e) => e.kind(),
        }
    }
}

/// Result type for simulation synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
