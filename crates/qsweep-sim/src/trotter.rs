//! First-order Trotter synthesis of the Heisenberg XXX chain.
//!
//! Every step applies, for each bond `(i, i+1)` in order,
//!
//!   exp(-i J dt X_i X_{i+1}) · exp(-i J dt Y_i Y_{i+1}) · exp(-i J dt Z_i Z_{i+1})
//!
//! and the full evolution repeats the step `ceil(total_time / dt)` times.

use qsweep_ir::{Circuit, CircuitBuilder, FixedGate, IrError, IrResult, QubitRegister};
use tracing::debug;

use crate::error::SimResult;
use crate::hamiltonian::{HeisenbergChain, PauliOp};
use crate::synthesis::append_pauli_pair;

/// Append one Trotter step of `chain` on `register`.
pub fn append_trotter_step(
    builder: &mut CircuitBuilder,
    chain: &HeisenbergChain,
    register: &QubitRegister,
) -> IrResult<()> {
    if register.len() != chain.length {
        return Err(IrError::parameter(
            "register",
            format!(
                "chain of length {} on a register of {} qubits",
                chain.length,
                register.len()
            ),
        ));
    }
    let angle = chain.pair_angle();
    for (i, j) in chain.bonds() {
        let (q0, q1) = (register.qubit(i)?, register.qubit(j)?);
        for pauli in PauliOp::XXX {
            append_pauli_pair(builder, pauli, angle, q0, q1)?;
        }
    }
    Ok(())
}

/// Build the measured evolution circuit.
///
/// Every spin starts in |+⟩, the chain evolves for `step_count` Trotter
/// steps and every spin is measured.
pub fn evolution_circuit(chain: &HeisenbergChain) -> SimResult<Circuit> {
    let steps = chain.step_count()?;
    debug!(
        family = "heisenberg",
        length = chain.length,
        steps,
        coupling = chain.coupling,
        dt = chain.dt,
        "building evolution circuit"
    );

    let mut builder = CircuitBuilder::new(format!("heisenberg_{}", chain.length));
    builder.scoped(chain.length, |b, reg| {
        b.apply_each(FixedGate::H, reg.qubits())?;
        for _ in 0..steps {
            append_trotter_step(b, chain, reg)?;
        }
        b.measure_register(reg)?;
        Ok(())
    })?;
    Ok(builder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsweep_ir::ErrorKind;

    #[test]
    fn test_circuit_shape() {
        let chain = HeisenbergChain::new(4, 1.0, 0.5, 1.0).unwrap();
        let circuit = evolution_circuit(&chain).unwrap();
        assert_eq!(circuit.name(), "heisenberg_4");
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_results(), 4);

        let counts = circuit.logical_counts().unwrap();
        // 2 steps × 3 bonds × 3 terms, one Rz and two CX each.
        assert_eq!(counts.count("rz"), 18);
        assert_eq!(counts.count("cx"), 36);
        assert_eq!(counts.measurement_count, 4);
    }

    #[test]
    fn test_single_spin_has_no_interactions() {
        let chain = HeisenbergChain::new(1, 1.0, 0.5, 5.0).unwrap();
        let circuit = evolution_circuit(&chain).unwrap();
        let counts = circuit.logical_counts().unwrap();
        assert_eq!(counts.count("rz"), 0);
        assert_eq!(counts.count("h"), 1);
    }

    #[test]
    fn test_register_length_mismatch() {
        let chain = HeisenbergChain::new(3, 1.0, 0.5, 5.0).unwrap();
        let mut b = CircuitBuilder::new("mismatch");
        let err = b
            .scoped(2, |b, reg| append_trotter_step(b, &chain, reg))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parameter);
    }
}
