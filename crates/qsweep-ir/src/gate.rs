//! Gate kinds.

use serde::{Deserialize, Serialize};

/// Axis of a parameterized single-qubit rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Rx(θ) = exp(-iθX/2).
    X,
    /// Ry(θ) = exp(-iθY/2).
    Y,
    /// Rz(θ) = exp(-iθZ/2).
    Z,
    /// R1(θ) = diag(1, e^{iθ}); a Z rotation that leaves |0⟩ untouched.
    Phase,
}

impl Axis {
    /// Name of the uncontrolled rotation on this axis.
    pub fn rotation_name(self) -> &'static str {
        match self {
            Axis::X => "rx",
            Axis::Y => "ry",
            Axis::Z => "rz",
            Axis::Phase => "r1",
        }
    }
}

/// Non-parameterized gates. Any of them may carry controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// SWAP gate.
    Swap,
}

impl FixedGate {
    /// Get the gate name.
    pub fn name(self) -> &'static str {
        match self {
            FixedGate::H => "h",
            FixedGate::X => "x",
            FixedGate::Y => "y",
            FixedGate::Z => "z",
            FixedGate::S => "s",
            FixedGate::Sdg => "sdg",
            FixedGate::T => "t",
            FixedGate::Tdg => "tdg",
            FixedGate::Swap => "swap",
        }
    }

    /// Number of target qubits (controls excluded).
    #[inline]
    pub fn num_targets(self) -> usize {
        match self {
            FixedGate::Swap => 2,
            _ => 1,
        }
    }

    /// The inverse gate.
    pub fn inverse(self) -> Self {
        match self {
            FixedGate::S => FixedGate::Sdg,
            FixedGate::Sdg => FixedGate::S,
            FixedGate::T => FixedGate::Tdg,
            FixedGate::Tdg => FixedGate::T,
            other => other,
        }
    }
}
