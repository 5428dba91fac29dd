//! Error types for the algorithm crate.

use qsweep_hal::HalError;
use qsweep_ir::{ErrorKind, IrError};
use qsweep_sim::SimError;
use thiserror::Error;

/// Errors raised while building, running or reading out an algorithm entry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// Circuit construction failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// Heisenberg synthesis failed.
    #[error("Evolution synthesis error: {0}")]
    Sim(#[from] SimError),

    /// Backend or estimator failure, passed through unchanged.
    #[error(transparent)]
    Hal(#[from] HalError),

    /// No catalog entry has the requested name.
    #[error("Unknown entry '{0}'")]
    UnknownEntry(String),
}

impl AlgoError {
    /// Construction-time classification, if this is a construction failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AlgoError::Ir(e) => Some(e.kind()),
            AlgoError::Sim(e) => Some(e.kind()),
            AlgoError::Hal(HalError::Ir(e)) => Some(e.kind()),
            AlgoError::Hal(_) | AlgoError::UnknownEntry(_) => None,
        }
    }
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
