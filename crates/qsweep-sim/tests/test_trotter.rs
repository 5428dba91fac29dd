//! State-vector checks of the Heisenberg synthesis.

use qsweep_adapter_sim::Statevector;
use qsweep_ir::{CircuitBuilder, QubitRegister};
use qsweep_sim::{HeisenbergChain, PauliOp, append_pauli_pair, append_trotter_step};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Run `build` inside a scoped register and return the state before the
/// register is released.
fn final_state<F>(n: usize, build: F) -> Statevector
where
    F: FnOnce(&mut CircuitBuilder, &QubitRegister) -> qsweep_ir::IrResult<()>,
{
    let mut builder = CircuitBuilder::new("check");
    builder
        .scoped(n, |b, reg| {
            build(b, reg)?;
            let mut sv = Statevector::new(b.width());
            let mut rng = StdRng::seed_from_u64(0);
            sv.run(b.ops(), &mut rng).unwrap();
            Ok(sv)
        })
        .unwrap()
}

// ---------------------------------------------------------------------------
// Pauli pairs
// ---------------------------------------------------------------------------

#[test]
fn pauli_pair_rotates_00_into_11() {
    // exp(-i θ/2 P⊗P)|00⟩ has weight sin²(θ/2) on |11⟩ for P = X and Y.
    let theta = 0.8_f64;
    for pauli in [PauliOp::X, PauliOp::Y] {
        let sv = final_state(2, |b, reg| append_pauli_pair(b, pauli, theta, reg[0], reg[1]));
        let expected = (theta / 2.0).sin().powi(2);
        assert!((sv.probability(0b11) - expected).abs() < 1e-10, "{pauli:?}");
        assert!((sv.probability(0b00) - (1.0 - expected)).abs() < 1e-10);
    }
}

#[test]
fn zz_pair_is_diagonal() {
    let sv = final_state(2, |b, reg| {
        b.h(reg[0])?.h(reg[1])?;
        append_pauli_pair(b, PauliOp::Z, 1.3, reg[0], reg[1])
    });
    for i in 0..4 {
        assert!((sv.probability(i) - 0.25).abs() < 1e-10);
    }
}

// ---------------------------------------------------------------------------
// Trotter steps
// ---------------------------------------------------------------------------

#[test]
fn two_site_exchange_matches_closed_form() {
    // On two sites XX, YY and ZZ commute, so Trotterization is exact and
    // |01⟩ → |10⟩ with probability sin²(2 J t).
    let chain = HeisenbergChain::new(2, 1.0, 0.25, 0.5).unwrap();
    let steps = chain.step_count().unwrap();
    assert_eq!(steps, 2);

    let sv = final_state(2, |b, reg| {
        b.x(reg[0])?;
        for _ in 0..steps {
            append_trotter_step(b, &chain, reg)?;
        }
        Ok(())
    });
    let t = chain.total_time;
    let expected = (2.0 * chain.coupling * t).sin().powi(2);
    assert!((sv.probability(0b10) - expected).abs() < 1e-10);
    assert!((sv.probability(0b01) - (1.0 - expected)).abs() < 1e-10);
}

#[test]
fn evolution_conserves_excitation_number() {
    let chain = HeisenbergChain::new(4, 0.7, 0.3, 0.9).unwrap();
    let sv = final_state(4, |b, reg| {
        b.x(reg[1])?;
        for _ in 0..chain.step_count().unwrap() {
            append_trotter_step(b, &chain, reg)?;
        }
        Ok(())
    });
    let single: f64 = (0..4).map(|q| sv.probability(1 << q)).sum();
    assert!((single - 1.0).abs() < 1e-10);
}
