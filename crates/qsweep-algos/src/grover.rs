//! Grover search for the alternating pattern.
//!
//! The oracle marks the single basis state in which qubit `i` holds
//! `i mod 2` (`0101...` in index order). Each iteration applies the oracle and
//! then the diffusion operator, both as conjugation blocks; the oracle borrows
//! one scratch qubit in |−⟩ from a nested scope.

use std::f64::consts::PI;

use qsweep_ir::{Circuit, CircuitBuilder, FixedGate, IrError, IrResult, MeasurementOutcome, QubitRegister};
use tracing::debug;

use crate::error::AlgoResult;

/// Optimal number of Grover iterations for an `n`-qubit search space with one
/// marked element: `round(π/4 / asin(1/√2ⁿ) − 1/2)`.
pub fn iteration_count(n: usize) -> IrResult<usize> {
    if n == 0 {
        return Err(IrError::parameter("num_qubits", "search needs at least one qubit"));
    }
    let amplitude = 1.0 / 2f64.powf(n as f64).sqrt();
    if amplitude == 0.0 {
        return Err(IrError::parameter(
            "num_qubits",
            format!("{n} qubits underflows the marked amplitude"),
        ));
    }
    let count = (0.25 * PI / amplitude.asin() - 0.5).round();
    Ok(count.max(0.0) as usize)
}

/// The marked basis state: qubit `i` holds `i mod 2`.
pub fn marked_pattern(n: usize) -> Vec<bool> {
    (0..n).map(|i| i % 2 == 1).collect()
}

/// True if `outcome` is exactly the marked pattern.
pub fn is_marked(outcome: &MeasurementOutcome) -> bool {
    outcome.bits() == marked_pattern(outcome.len()).as_slice()
}

/// Flip the phase of the marked state.
pub fn append_oracle(builder: &mut CircuitBuilder, register: &QubitRegister) -> IrResult<()> {
    builder.conjugate(
        |b| {
            for q in register.iter().step_by(2) {
                b.x(q)?;
            }
            Ok(())
        },
        |b| {
            b.scoped(1, |b, scratch| {
                let target = scratch[0];
                b.conjugate(
                    |b| {
                        b.x(target)?.h(target)?;
                        Ok(())
                    },
                    |b| {
                        b.mcx(register.qubits(), target)?;
                        Ok(())
                    },
                )?;
                Ok(())
            })
        },
    )?;
    Ok(())
}

/// Reflect about the uniform superposition.
pub fn append_diffusion(builder: &mut CircuitBuilder, register: &QubitRegister) -> IrResult<()> {
    let qubits = register.qubits();
    let Some((&target, controls)) = qubits.split_last() else {
        return Err(IrError::parameter("register", "diffusion needs at least one qubit"));
    };
    builder.conjugate(
        |b| {
            b.apply_each(FixedGate::H, qubits)?;
            b.apply_each(FixedGate::X, qubits)?;
            Ok(())
        },
        |b| {
            b.mcz(controls, target)?;
            Ok(())
        },
    )?;
    Ok(())
}

/// Uniform superposition followed by `iterations` rounds of oracle and
/// diffusion.
pub fn append_search(
    builder: &mut CircuitBuilder,
    register: &QubitRegister,
    iterations: usize,
) -> IrResult<()> {
    builder.apply_each(FixedGate::H, register.qubits())?;
    for _ in 0..iterations {
        append_oracle(builder, register)?;
        append_diffusion(builder, register)?;
    }
    Ok(())
}

/// Build the `n`-qubit search circuit.
pub fn search_circuit(n: usize, measure: bool) -> AlgoResult<Circuit> {
    let iterations = iteration_count(n)?;
    debug!(family = "grover", num_qubits = n, iterations, measure, "building search circuit");

    let mut builder = CircuitBuilder::new(format!("grover_{n}"));
    builder.scoped(n, |b, reg| {
        append_search(b, reg, iterations)?;
        if measure {
            b.measure_register(reg)?;
        }
        Ok(())
    })?;
    Ok(builder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsweep_ir::{ErrorKind, GateOp};

    #[test]
    fn test_iteration_counts() {
        // 0.5 and 1.5 before rounding.
        assert_eq!(iteration_count(1).unwrap(), 1);
        assert_eq!(iteration_count(2).unwrap(), 1);
        assert_eq!(iteration_count(3).unwrap(), 2);
        assert_eq!(iteration_count(5).unwrap(), 4);
        assert_eq!(iteration_count(10).unwrap(), 25);
        assert_eq!(iteration_count(15).unwrap(), 181);
        assert_eq!(iteration_count(20).unwrap(), 1448);
        assert_eq!(iteration_count(25).unwrap(), 11585);
    }

    #[test]
    fn test_zero_qubits_is_parameter_error() {
        assert_eq!(iteration_count(0).unwrap_err().kind(), ErrorKind::Parameter);
        let err = search_circuit(0, true).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Parameter));
    }

    #[test]
    fn test_marked_pattern() {
        assert_eq!(marked_pattern(4), vec![false, true, false, true]);
        assert!(is_marked(&MeasurementOutcome::from_bitstring("01010").unwrap()));
        assert!(!is_marked(&MeasurementOutcome::from_bitstring("01011").unwrap()));
    }

    #[test]
    fn test_circuit_structure() {
        let circuit = search_circuit(5, true).unwrap();
        assert_eq!(circuit.name(), "grover_5");
        // Five inputs plus the oracle's scratch qubit.
        assert_eq!(circuit.num_qubits(), 6);
        assert_eq!(circuit.num_results(), 5);

        let conjugations = circuit
            .ops()
            .iter()
            .filter(|op| matches!(op, GateOp::Conjugation { .. }))
            .count();
        assert_eq!(conjugations, 2 * 4);

        let counts = circuit.logical_counts().unwrap();
        assert_eq!(counts.count("mcx"), 4);
        assert_eq!(counts.count("mcz"), 4);
    }

    #[test]
    fn test_measurement_is_optional() {
        let circuit = search_circuit(4, false).unwrap();
        assert_eq!(circuit.num_results(), 0);
    }
}
