//! State-vector checks of the algorithm builders.

use std::f64::consts::PI;

use proptest::prelude::*;
use qsweep_adapter_sim::Statevector;
use qsweep_algos::grover::{append_oracle, append_search, iteration_count, marked_pattern};
use qsweep_algos::qpe::{
    append_inverse_qft, append_phase_estimation, append_qft, estimation_error, true_phase,
};
use qsweep_algos::vqe::{append_ansatz, append_double_excitation};
use qsweep_algos::Molecule;
use qsweep_ir::{CircuitBuilder, FixedGate, GateOp, IrResult, QubitId, QubitRegister};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Simulate what `build` recorded, before the register is released.
fn final_state<F>(n: usize, build: F) -> Statevector
where
    F: FnOnce(&mut CircuitBuilder, &QubitRegister) -> IrResult<()>,
{
    let mut builder = CircuitBuilder::new("check");
    builder
        .scoped(n, |b, reg| {
            build(b, reg)?;
            let mut sv = Statevector::new(b.width());
            sv.run(b.ops(), &mut StdRng::seed_from_u64(0)).unwrap();
            Ok(sv)
        })
        .unwrap()
}

fn index_of(bits: &[bool]) -> usize {
    bits.iter()
        .enumerate()
        .filter(|(_, b)| **b)
        .map(|(i, _)| 1 << i)
        .sum()
}

// ---------------------------------------------------------------------------
// Grover
// ---------------------------------------------------------------------------

#[test]
fn grover_finds_marked_pattern() {
    for n in [2, 3, 4] {
        let iterations = iteration_count(n).unwrap();
        let sv = final_state(n, |b, reg| append_search(b, reg, iterations));
        // The scratch qubit is back in |0⟩, so only input indices carry weight.
        let p = sv.probability(index_of(&marked_pattern(n)));
        assert!(p > 0.9, "n = {n}: P(marked) = {p}");
    }
}

#[test]
fn grover_boundary_sizes_find_marked_pattern() {
    // One and two qubits sit on the half-integer rounding boundary.
    for n in [1, 2] {
        assert_eq!(iteration_count(n).unwrap(), 1);
        let sv = final_state(n, |b, reg| append_search(b, reg, 1));
        let p = sv.probability(index_of(&marked_pattern(n)));
        assert!(p > 0.49, "n = {n}: P(marked) = {p}");
    }
}

#[test]
fn oracle_scratch_returns_to_ground_before_reset() {
    for n in [2, 3, 4] {
        let mut builder = CircuitBuilder::new("oracle");
        builder
            .scoped(n, |b, reg| {
                b.apply_each(FixedGate::H, reg.qubits())?;
                append_oracle(b, reg)?;

                let mut flat = Vec::new();
                for op in b.ops() {
                    op.expand_into(&mut flat)?;
                }
                let scratch = QubitId(n as u32);
                let reset_at = flat
                    .iter()
                    .position(|op| matches!(op, GateOp::Reset { target } if *target == scratch))
                    .expect("scratch qubit is reset");

                let mut sv = Statevector::new(b.width());
                sv.run(&flat[..reset_at], &mut StdRng::seed_from_u64(0)).unwrap();
                assert!(sv.probability_one(scratch) < 1e-12, "n = {n}");

                // Only the marked amplitude changed sign.
                let marked = index_of(&marked_pattern(n));
                for (i, amp) in sv.amplitudes().iter().take(1 << n).enumerate() {
                    assert_eq!(amp.re < 0.0, i == marked, "n = {n}, index {i}");
                }
                Ok(())
            })
            .unwrap();
    }
}

// ---------------------------------------------------------------------------
// Phase estimation
// ---------------------------------------------------------------------------

/// Most likely counting value and the error of the phase it encodes.
fn most_likely_phase(m: usize, theta: f64) -> (f64, f64) {
    let mut builder = CircuitBuilder::new("qpe");
    builder
        .scoped(m, |b, counting| {
            b.scoped(1, |b, carrier| {
                append_phase_estimation(b, counting, carrier[0], theta)?;
                let mut sv = Statevector::new(b.width());
                sv.run(b.ops(), &mut StdRng::seed_from_u64(0)).unwrap();
                let carrier_bit = 1 << carrier[0].index();
                let (best, p) = (0..1usize << m)
                    .map(|x| (x, sv.probability(x | carrier_bit)))
                    .fold((0, 0.0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
                Ok((best as f64 / (1u64 << m) as f64, p))
            })
        })
        .unwrap()
}

#[test]
fn qpe_recovers_exact_phases() {
    for (m, phase) in [(3, 0.375), (3, 0.125), (4, 0.625), (5, 0.25)] {
        let (estimated, p) = most_likely_phase(m, 4.0 * PI * phase);
        assert!((estimated - phase).abs() < 1e-12, "m = {m}: {estimated} != {phase}");
        assert!(p > 1.0 - 1e-9);
    }
}

#[test]
fn qpe_error_shrinks_with_counting_qubits() {
    let theta = 1.0;
    let errors: Vec<f64> = [3, 5, 8]
        .into_iter()
        .map(|m| estimation_error(most_likely_phase(m, theta).0, true_phase(theta)))
        .collect();
    for (m, e) in [3, 5, 8].into_iter().zip(&errors) {
        assert!(*e <= 0.5f64.powi(m + 1) + 1e-12, "m = {m}: error {e}");
    }
    assert!(errors[2] < errors[1] && errors[1] < errors[0]);
}

#[test]
fn inverse_qft_undoes_qft() {
    for n in 1..=3 {
        let prepare = |b: &mut CircuitBuilder, reg: &QubitRegister| -> IrResult<()> {
            for (k, q) in reg.iter().enumerate() {
                b.ry(0.3 + 0.7 * k as f64, q)?;
            }
            if n > 1 {
                b.cx(reg[0], reg[n - 1])?;
            }
            Ok(())
        };
        let reference = final_state(n, prepare);
        let round_trip = final_state(n, |b, reg| {
            prepare(b, reg)?;
            append_qft(b, reg)?;
            append_inverse_qft(b, reg)
        });
        assert!((reference.overlap(&round_trip) - 1.0).abs() < 1e-10, "n = {n}");
    }
}

#[test]
fn qft_of_basis_state_is_uniform() {
    let sv = final_state(3, |b, reg| {
        b.x(reg[1])?;
        append_qft(b, reg)
    });
    for i in 0..8 {
        assert!((sv.probability(i) - 0.125).abs() < 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Chemistry ansatz
// ---------------------------------------------------------------------------

#[test]
fn zero_angle_ansatz_keeps_hartree_fock_state() {
    for molecule in Molecule::ALL {
        let spec = molecule.spec();
        let sv = final_state(spec.num_qubits, |b, reg| append_ansatz(b, reg, molecule, 0.0));
        let hartree_fock = (1 << spec.electrons) - 1;
        assert!(
            (sv.probability(hartree_fock) - 1.0).abs() < 1e-10,
            "{molecule}"
        );
    }
}

#[test]
fn nonzero_angle_ansatz_moves_amplitude() {
    let spec = Molecule::LiH.spec();
    let sv = final_state(spec.num_qubits, |b, reg| append_ansatz(b, reg, Molecule::LiH, 0.8));
    assert!(sv.probability(0b1111) < 0.5);
    let norm: f64 = (0..1 << spec.num_qubits).map(|i| sv.probability(i)).sum();
    assert!((norm - 1.0).abs() < 1e-10);
}

proptest! {
    #[test]
    fn zero_angle_double_excitation_is_identity(basis in 0usize..16) {
        let sv = final_state(4, |b, reg| {
            for (k, q) in reg.iter().enumerate() {
                if basis & (1 << k) != 0 {
                    b.x(q)?;
                }
            }
            append_double_excitation(b, reg, 0.0, (0, 1, 2, 3))
        });
        prop_assert!((sv.probability(basis) - 1.0).abs() < 1e-12);
    }
}
