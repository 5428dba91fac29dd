//! Error types for the IR crate.

use std::fmt;

use crate::qubit::QubitId;
use thiserror::Error;

/// Coarse classification of construction failures.
///
/// Every [`IrError`] belongs to exactly one of these categories; callers that
/// only care about the category (drivers, reports) match on [`IrError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid size, index or count supplied by the caller.
    Parameter,
    /// A structural rule of circuit composition was violated.
    Construction,
    /// A qubit register was used or released outside its scope.
    ResourceLifecycle,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Parameter => "parameter error",
            ErrorKind::Construction => "construction error",
            ErrorKind::ResourceLifecycle => "resource lifecycle error",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building or inspecting circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A size or index argument is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending argument.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate received the wrong number of target qubits.
    #[error("Gate '{gate_name}' requires {expected} target qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of targets.
        expected: usize,
        /// Actual number of targets provided.
        got: usize,
    },

    /// A conjugation setup contains an operation without an inverse.
    #[error("Conjugation setup contains non-unitary operation '{op}'")]
    NonInvertibleSetup {
        /// Name of the offending operation.
        op: String,
    },

    /// Inverse requested for a measurement or reset.
    #[error("Operation '{op}' has no inverse")]
    NotInvertible {
        /// Name of the offending operation.
        op: String,
    },

    /// A flattened sequence was expected but a conjugation block was found.
    #[error("Invalid DAG structure: {0}")]
    InvalidDag(String),

    /// Qubit is not owned by any live register.
    #[error("Qubit {qubit} is not live{}", format_gate_context(.gate_name))]
    QubitNotLive {
        /// The qubit that was referenced.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Registers must be released innermost first.
    #[error("Register scope {got} released while scope {expected} is still live")]
    ReleaseOutOfOrder {
        /// Scope that must be released next.
        expected: u32,
        /// Scope that was released.
        got: u32,
    },

    /// A register was never released.
    #[error("{count} register(s) still live at end of {context}")]
    UnreleasedRegisters {
        /// Number of live registers.
        count: usize,
        /// Where the leak was detected.
        context: &'static str,
    },
}

impl IrError {
    /// Shorthand for [`IrError::InvalidParameter`].
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        IrError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IrError::InvalidParameter { .. }
            | IrError::DuplicateQubit { .. }
            | IrError::QubitCountMismatch { .. } => ErrorKind::Parameter,
            IrError::NonInvertibleSetup { .. }
            | IrError::NotInvertible { .. }
            | IrError::InvalidDag(_) => ErrorKind::Construction,
            IrError::QubitNotLive { .. }
            | IrError::ReleaseOutOfOrder { .. }
            | IrError::UnreleasedRegisters { .. } => ErrorKind::ResourceLifecycle,
        }
    }
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
