//! Pauli-pair exponentiation.
//!
//! Synthesises
//!
//!   exp(-i · θ/2 · P⊗P),   P ∈ {X, Y, Z}
//!
//! as one conjugation block: the setup rotates both qubits into the Z basis
//! and collapses their parity onto the second qubit, the body is `Rz(θ)` on
//! that qubit, and the builder appends the exact inverse of the setup.
//!
//!   X → H
//!   Y → Sdg · H
//!   Z → identity

use qsweep_ir::{CircuitBuilder, IrResult, QubitId};

use crate::hamiltonian::PauliOp;

/// Append `exp(-i · angle/2 · pauli⊗pauli)` on `(q0, q1)`.
pub fn append_pauli_pair(
    builder: &mut CircuitBuilder,
    pauli: PauliOp,
    angle: f64,
    q0: QubitId,
    q1: QubitId,
) -> IrResult<()> {
    builder.conjugate(
        |b| {
            basis_change(b, pauli, q0)?;
            basis_change(b, pauli, q1)?;
            b.cx(q0, q1)?;
            Ok(())
        },
        |b| {
            b.rz(angle, q1)?;
            Ok(())
        },
    )?;
    Ok(())
}

/// Rotate `qubit` so that `pauli` becomes Z.
fn basis_change(builder: &mut CircuitBuilder, pauli: PauliOp, qubit: QubitId) -> IrResult<()> {
    match pauli {
        PauliOp::X => {
            builder.h(qubit)?;
        }
        PauliOp::Y => {
            builder.sdg(qubit)?.h(qubit)?;
        }
        PauliOp::Z => {}
    }
    Ok(())
}
