//! Classical readout of the evolved chain.

use qsweep_ir::{IrError, MeasurementOutcome};

use crate::error::SimResult;

/// Fraction of spins measured as `1`, in `[0, 1]`.
pub fn magnetization(outcome: &MeasurementOutcome, length: usize) -> SimResult<f64> {
    if length == 0 {
        return Err(IrError::parameter("length", "must be at least 1").into());
    }
    if outcome.len() != length {
        return Err(IrError::parameter(
            "outcome",
            format!("expected {length} bits, got {}", outcome.len()),
        )
        .into());
    }
    Ok(outcome.count_ones() as f64 / length as f64)
}
