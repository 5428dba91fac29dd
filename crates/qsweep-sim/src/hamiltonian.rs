//! Heisenberg XXX chain description.
//!
//! The open chain of `length` spins evolves under
//!
//!   H = J · Σ_i ( X_i X_{i+1} + Y_i Y_{i+1} + Z_i Z_{i+1} )
//!
//! for `total_time`, sliced into steps of `dt`.
//!
//! # Example
//!
//! ```rust
//! use qsweep_sim::hamiltonian::HeisenbergChain;
//!
//! let chain = HeisenbergChain::new(10, 1.0, 0.5, 5.0).unwrap();
//! assert_eq!(chain.step_count().unwrap(), 10);
//! assert_eq!(chain.bonds().count(), 9);
//! ```

use serde::{Deserialize, Serialize};

use qsweep_ir::IrError;

use crate::error::{SimError, SimResult};

/// Single-qubit Pauli operator of a two-site interaction term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Interaction terms of one bond, in application order.
    pub const XXX: [PauliOp; 3] = [PauliOp::X, PauliOp::Y, PauliOp::Z];
}

/// Parameters of a Trotterized Heisenberg XXX evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeisenbergChain {
    /// Number of spins (qubits).
    pub length: usize,
    /// Exchange coupling J.
    pub coupling: f64,
    /// Trotter step size.
    pub dt: f64,
    /// Total evolution time.
    pub total_time: f64,
}

impl HeisenbergChain {
    /// Create a validated chain.
    pub fn new(length: usize, coupling: f64, dt: f64, total_time: f64) -> SimResult<Self> {
        let chain = Self {
            length,
            coupling,
            dt,
            total_time,
        };
        chain.validate()?;
        Ok(chain)
    }

    /// Check the parameters.
    pub fn validate(&self) -> SimResult<()> {
        if self.length == 0 {
            return Err(IrError::parameter("length", "chain needs at least one spin").into());
        }
        if !self.coupling.is_finite() {
            return Err(IrError::parameter("coupling", "must be finite").into());
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(IrError::parameter("dt", format!("must be positive, got {}", self.dt)).into());
        }
        if !(self.total_time.is_finite() && self.total_time >= 0.0) {
            return Err(IrError::parameter(
                "total_time",
                format!("must be non-negative, got {}", self.total_time),
            )
            .into());
        }
        Ok(())
    }

    /// Number of Trotter steps: `ceil(total_time / dt)`.
    pub fn step_count(&self) -> SimResult<usize> {
        self.validate()?;
        let steps = (self.total_time / self.dt).ceil();
        if steps > u32::MAX as f64 {
            return Err(SimError::TooManySteps {
                total_time: self.total_time,
                dt: self.dt,
            });
        }
        Ok(steps as usize)
    }

    /// Rotation angle of every Pauli-pair exponential: `2·J·dt`.
    pub fn pair_angle(&self) -> f64 {
        2.0 * self.coupling * self.dt
    }

    /// Nearest-neighbour bonds `(i, i + 1)`.
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize)> {
        (1..self.length).map(|i| (i - 1, i))
    }
}
