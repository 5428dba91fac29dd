//! Statevector simulation engine.
//!
//! Basis-state indices are little-endian: qubit `q` is bit `q` of the index.
//! Every gate carries a control mask; a gate acts only on the basis states
//! where all control bits are set.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use qsweep_hal::{HalError, HalResult};
use qsweep_ir::{Axis, FixedGate, GateOp, MeasurementOutcome, QubitId, inverse_sequence};

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A statevector representing a quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// State amplitudes, little-endian basis order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Probability of the basis state `index`.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |a| a.norm_sqr())
    }

    /// Probability of measuring `1` on `qubit`.
    pub fn probability_one(&self, qubit: QubitId) -> f64 {
        let mask = 1 << qubit.index();
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// |⟨self|other⟩|, one for states equal up to global phase.
    pub fn overlap(&self, other: &Statevector) -> f64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum::<Complex64>()
            .norm()
    }

    /// Apply every operation in `ops`, returning the measurement results.
    pub fn run<R: Rng>(&mut self, ops: &[GateOp], rng: &mut R) -> HalResult<MeasurementOutcome> {
        let mut outcome = MeasurementOutcome::default();
        for op in ops {
            self.apply(op, rng, &mut outcome)?;
        }
        Ok(outcome)
    }

    /// Apply one operation. Measurements append to `outcome`.
    pub fn apply<R: Rng>(
        &mut self,
        op: &GateOp,
        rng: &mut R,
        outcome: &mut MeasurementOutcome,
    ) -> HalResult<()> {
        match op {
            GateOp::Rotation {
                axis,
                angle,
                target,
            } => {
                let t = self.index_of(*target)?;
                self.apply_rotation(0, t, *axis, *angle);
            }
            GateOp::ControlledRotation {
                axis,
                angle,
                controls,
                target,
            } => {
                let mask = self.mask_of(controls)?;
                let t = self.index_of(*target)?;
                self.apply_rotation(mask, t, *axis, *angle);
            }
            GateOp::Fixed {
                gate,
                controls,
                targets,
            } => {
                let mask = self.mask_of(controls)?;
                let targets = targets
                    .iter()
                    .map(|q| self.index_of(*q))
                    .collect::<HalResult<Vec<_>>>()?;
                self.apply_fixed(mask, *gate, &targets)?;
            }
            GateOp::Conjugation { setup, body } => {
                for inner in setup.iter().chain(body) {
                    self.apply(inner, rng, outcome)?;
                }
                for inner in &inverse_sequence(setup)? {
                    self.apply(inner, rng, outcome)?;
                }
            }
            GateOp::Measure { target } => {
                let t = self.index_of(*target)?;
                outcome.push(self.measure(t, rng));
            }
            GateOp::Reset { target } => {
                let t = self.index_of(*target)?;
                if self.measure(t, rng) {
                    self.apply_x(0, t);
                }
            }
        }
        Ok(())
    }

    fn index_of(&self, qubit: QubitId) -> HalResult<usize> {
        let q = qubit.index();
        if q >= self.num_qubits {
            return Err(HalError::InvalidCircuit(format!(
                "qubit {qubit} outside {}-qubit statevector",
                self.num_qubits
            )));
        }
        Ok(q)
    }

    fn mask_of(&self, controls: &[QubitId]) -> HalResult<usize> {
        controls
            .iter()
            .try_fold(0usize, |mask, q| Ok(mask | (1 << self.index_of(*q)?)))
    }

    fn apply_rotation(&mut self, ctrl_mask: usize, target: usize, axis: Axis, theta: f64) {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        match axis {
            Axis::X => {
                let neg_i_s = Complex64::new(0.0, -s);
                let c = Complex64::new(c, 0.0);
                self.apply_matrix(ctrl_mask, target, [[c, neg_i_s], [neg_i_s, c]]);
            }
            Axis::Y => {
                let (c, s) = (Complex64::new(c, 0.0), Complex64::new(s, 0.0));
                self.apply_matrix(ctrl_mask, target, [[c, -s], [s, c]]);
            }
            Axis::Z => self.apply_diagonal(
                ctrl_mask,
                target,
                Complex64::from_polar(1.0, -theta / 2.0),
                Complex64::from_polar(1.0, theta / 2.0),
            ),
            Axis::Phase => {
                self.apply_diagonal(ctrl_mask, target, ONE, Complex64::from_polar(1.0, theta));
            }
        }
    }

    fn apply_fixed(&mut self, ctrl_mask: usize, gate: FixedGate, targets: &[usize]) -> HalResult<()> {
        if targets.len() != gate.num_targets() {
            return Err(HalError::InvalidCircuit(format!(
                "gate '{}' expects {} targets, got {}",
                gate.name(),
                gate.num_targets(),
                targets.len()
            )));
        }
        let t = targets[0];
        match gate {
            FixedGate::X => self.apply_x(ctrl_mask, t),
            FixedGate::Y => self.apply_matrix(ctrl_mask, t, [[ZERO, -I], [I, ZERO]]),
            FixedGate::Z => self.apply_diagonal(ctrl_mask, t, ONE, -ONE),
            FixedGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                self.apply_matrix(ctrl_mask, t, [[h, h], [h, -h]]);
            }
            FixedGate::S => self.apply_diagonal(ctrl_mask, t, ONE, I),
            FixedGate::Sdg => self.apply_diagonal(ctrl_mask, t, ONE, -I),
            FixedGate::T => {
                self.apply_diagonal(ctrl_mask, t, ONE, Complex64::from_polar(1.0, PI / 4.0));
            }
            FixedGate::Tdg => {
                self.apply_diagonal(ctrl_mask, t, ONE, Complex64::from_polar(1.0, -PI / 4.0));
            }
            FixedGate::Swap => self.apply_swap(ctrl_mask, t, targets[1]),
        }
        Ok(())
    }

    // =========================================================================
    // Kernels
    // =========================================================================

    fn apply_matrix(&mut self, ctrl_mask: usize, target: usize, m: Matrix2) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & ctrl_mask == ctrl_mask {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_diagonal(&mut self, ctrl_mask: usize, target: usize, d0: Complex64, d1: Complex64) {
        let tgt_mask = 1 << target;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & ctrl_mask == ctrl_mask {
                *amp *= if i & tgt_mask == 0 { d0 } else { d1 };
            }
        }
    }

    fn apply_x(&mut self, ctrl_mask: usize, target: usize) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & ctrl_mask == ctrl_mask {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_swap(&mut self, ctrl_mask: usize, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & ctrl_mask == ctrl_mask && i & mask1 != 0 && i & mask2 == 0 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Measure `qubit`, collapsing the state.
    fn measure<R: Rng>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let mask = 1 << qubit;
        let p_one: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();
        let r: f64 = rng.r#gen();
        let result = r < p_one;
        let keep_prob = if result { p_one } else { 1.0 - p_one };
        let norm = keep_prob.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == result {
                if norm > 0.0 {
                    *amp /= norm;
                }
            } else {
                *amp = ZERO;
            }
        }
        result
    }
}
