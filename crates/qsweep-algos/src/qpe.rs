//! Quantum phase estimation of `Rz(θ)`.
//!
//! The carrier qubit is prepared in |1⟩, on which `Rz(θ)` acts as the phase
//! `e^{iθ/2} = e^{2πi·θ/(4π)}`. Counting qubit `k` (least significant first)
//! controls `Rz(2^k·θ)` on the carrier, and the inverse Fourier transform
//! turns the accumulated phases into the binary fraction of `θ/(4π)`.

use std::f64::consts::PI;

use qsweep_ir::{
    Axis, Circuit, CircuitBuilder, IrError, IrResult, MeasurementOutcome, QubitId, QubitRegister,
};
use tracing::debug;

use crate::error::AlgoResult;

/// Apply the Fourier transform to `register`, least significant qubit first.
pub fn append_qft(builder: &mut CircuitBuilder, register: &QubitRegister) -> IrResult<()> {
    let q = register.qubits();
    let m = q.len();
    append_bit_reversal(builder, q)?;
    for i in 0..m {
        builder.h(q[i])?;
        for j in i + 1..m {
            builder.cr1(PI / 2f64.powi((j - i) as i32), q[j], q[i])?;
        }
    }
    Ok(())
}

/// Apply the inverse Fourier transform to `register`.
pub fn append_inverse_qft(builder: &mut CircuitBuilder, register: &QubitRegister) -> IrResult<()> {
    let q = register.qubits();
    let m = q.len();
    for i in (0..m).rev() {
        for j in (i + 1..m).rev() {
            builder.cr1(-PI / 2f64.powi((j - i) as i32), q[j], q[i])?;
        }
        builder.h(q[i])?;
    }
    append_bit_reversal(builder, q)
}

fn append_bit_reversal(builder: &mut CircuitBuilder, qubits: &[QubitId]) -> IrResult<()> {
    let m = qubits.len();
    for k in 0..m / 2 {
        builder.swap(qubits[k], qubits[m - 1 - k])?;
    }
    Ok(())
}

/// Phase estimation of `Rz(theta)` with `counting` as the counting register
/// and `carrier` as the eigenstate qubit.
pub fn append_phase_estimation(
    builder: &mut CircuitBuilder,
    counting: &QubitRegister,
    carrier: QubitId,
    theta: f64,
) -> IrResult<()> {
    builder.x(carrier)?;
    for q in counting.iter() {
        builder.h(q)?;
    }
    for (k, q) in counting.iter().enumerate() {
        let angle = 2f64.powi(k as i32) * theta;
        builder.controlled_rotate(Axis::Z, angle, &[q], carrier)?;
    }
    append_inverse_qft(builder, counting)
}

/// Build the measured phase-estimation circuit with `m` counting qubits.
pub fn phase_estimation_circuit(m: usize, theta: f64) -> AlgoResult<Circuit> {
    if m == 0 {
        return Err(IrError::parameter("counting_qubits", "must be at least 1").into());
    }
    if !theta.is_finite() {
        return Err(IrError::parameter("theta", "must be finite").into());
    }
    debug!(family = "qpe", counting_qubits = m, theta, "building phase-estimation circuit");

    let mut builder = CircuitBuilder::new(format!("qpe_{m}"));
    builder.scoped(m, |b, counting| {
        b.scoped(1, |b, carrier| {
            append_phase_estimation(b, counting, carrier[0], theta)?;
            b.measure_register(counting)?;
            Ok(())
        })
    })?;
    Ok(builder.finish()?)
}

/// Binary fraction encoded by the counting bits, least significant first:
/// `Σ bit_i · 2^i / 2^m`.
pub fn estimate_phase(outcome: &MeasurementOutcome) -> IrResult<f64> {
    let m = outcome.len();
    if m == 0 {
        return Err(IrError::parameter("outcome", "no counting bits"));
    }
    Ok(outcome
        .bits()
        .iter()
        .enumerate()
        .filter(|(_, bit)| **bit)
        .map(|(i, _)| 2f64.powi(i as i32 - m as i32))
        .sum())
}

/// Eigenphase of `Rz(theta)` on |1⟩, as a fraction of a full turn.
///
/// Only valid for the `Rz` reference unitary built here.
pub fn true_phase(theta: f64) -> f64 {
    theta / (4.0 * PI)
}

/// Absolute difference between estimated and true phase.
pub fn estimation_error(estimated: f64, true_phase: f64) -> f64 {
    (estimated - true_phase).abs()
}
