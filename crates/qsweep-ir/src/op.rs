//! Gate operations recorded by the circuit builder.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Axis, FixedGate};
use crate::qubit::QubitId;

/// One recorded operation.
///
/// Operations other than [`GateOp::Measure`] and [`GateOp::Reset`] are unitary.
/// A [`GateOp::Conjugation`] acts as `setup`, then `body`, then the inverse of
/// `setup` in reverse order; its setup never contains a non-unitary operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateOp {
    /// Single-qubit rotation.
    Rotation {
        /// Rotation axis.
        axis: Axis,
        /// Angle in radians.
        angle: f64,
        /// Target qubit.
        target: QubitId,
    },
    /// Rotation applied only when every control is |1⟩.
    ControlledRotation {
        /// Rotation axis.
        axis: Axis,
        /// Angle in radians.
        angle: f64,
        /// Control qubits.
        controls: Vec<QubitId>,
        /// Target qubit.
        target: QubitId,
    },
    /// Fixed gate with zero or more controls.
    Fixed {
        /// Gate kind.
        gate: FixedGate,
        /// Control qubits (empty for the plain gate).
        controls: Vec<QubitId>,
        /// Target qubits.
        targets: Vec<QubitId>,
    },
    /// Setup, body, then inverse(setup).
    Conjugation {
        /// Operations undone after the body.
        setup: Vec<GateOp>,
        /// Operations applied once.
        body: Vec<GateOp>,
    },
    /// Computational-basis measurement appending one result bit.
    Measure {
        /// Measured qubit.
        target: QubitId,
    },
    /// Return a qubit to |0⟩.
    Reset {
        /// Qubit to reset.
        target: QubitId,
    },
}

fn controlled_name(base: &str, controls: usize) -> String {
    match controls {
        0 => base.to_string(),
        1 => format!("c{base}"),
        2 => format!("cc{base}"),
        _ => format!("mc{base}"),
    }
}

impl GateOp {
    /// Plain fixed gate on a single target.
    pub fn fixed(gate: FixedGate, target: QubitId) -> Self {
        GateOp::Fixed {
            gate,
            controls: vec![],
            targets: vec![target],
        }
    }

    /// Canonical name used in gate counts (`h`, `cx`, `ccx`, `mcz`, `crz`, ...).
    pub fn name(&self) -> String {
        match self {
            GateOp::Rotation { axis, .. } => axis.rotation_name().to_string(),
            GateOp::ControlledRotation { axis, controls, .. } => {
                controlled_name(axis.rotation_name(), controls.len())
            }
            GateOp::Fixed { gate, controls, .. } => controlled_name(gate.name(), controls.len()),
            GateOp::Conjugation { .. } => "conjugation".to_string(),
            GateOp::Measure { .. } => "measure".to_string(),
            GateOp::Reset { .. } => "reset".to_string(),
        }
    }

    /// True if this operation (and everything nested in it) is unitary.
    pub fn is_unitary(&self) -> bool {
        match self {
            GateOp::Measure { .. } | GateOp::Reset { .. } => false,
            GateOp::Conjugation { setup, body } => {
                setup.iter().all(GateOp::is_unitary) && body.iter().all(GateOp::is_unitary)
            }
            _ => true,
        }
    }

    /// Control qubits of a controlled gate; empty otherwise.
    pub fn controls(&self) -> &[QubitId] {
        match self {
            GateOp::ControlledRotation { controls, .. } | GateOp::Fixed { controls, .. } => {
                controls
            }
            _ => &[],
        }
    }

    /// Every qubit touched, in first-use order and without repeats.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut out = Vec::new();
        self.collect_qubits(&mut out);
        out
    }

    fn collect_qubits(&self, out: &mut Vec<QubitId>) {
        fn push(out: &mut Vec<QubitId>, q: QubitId) {
            if !out.contains(&q) {
                out.push(q);
            }
        }
        match self {
            GateOp::Rotation { target, .. }
            | GateOp::Measure { target }
            | GateOp::Reset { target } => push(out, *target),
            GateOp::ControlledRotation {
                controls, target, ..
            } => {
                for &c in controls {
                    push(out, c);
                }
                push(out, *target);
            }
            GateOp::Fixed {
                controls, targets, ..
            } => {
                for &q in controls.iter().chain(targets) {
                    push(out, q);
                }
            }
            GateOp::Conjugation { setup, body } => {
                for op in setup.iter().chain(body) {
                    op.collect_qubits(out);
                }
            }
        }
    }

    /// The inverse operation.
    ///
    /// Measurements and resets have no inverse. A conjugation inverts to the
    /// same setup around the inverted body.
    pub fn inverse(&self) -> IrResult<GateOp> {
        match self {
            GateOp::Rotation {
                axis,
                angle,
                target,
            } => Ok(GateOp::Rotation {
                axis: *axis,
                angle: -angle,
                target: *target,
            }),
            GateOp::ControlledRotation {
                axis,
                angle,
                controls,
                target,
            } => Ok(GateOp::ControlledRotation {
                axis: *axis,
                angle: -angle,
                controls: controls.clone(),
                target: *target,
            }),
            GateOp::Fixed {
                gate,
                controls,
                targets,
            } => Ok(GateOp::Fixed {
                gate: gate.inverse(),
                controls: controls.clone(),
                targets: targets.clone(),
            }),
            GateOp::Conjugation { setup, body } => Ok(GateOp::Conjugation {
                setup: setup.clone(),
                body: inverse_sequence(body)?,
            }),
            GateOp::Measure { .. } | GateOp::Reset { .. } => Err(IrError::NotInvertible {
                op: self.name(),
            }),
        }
    }

    /// Append the fully expanded primitive sequence of this operation to `out`.
    pub fn expand_into(&self, out: &mut Vec<GateOp>) -> IrResult<()> {
        match self {
            GateOp::Conjugation { setup, body } => {
                for op in setup.iter().chain(body) {
                    op.expand_into(out)?;
                }
                for op in inverse_sequence(setup)? {
                    op.expand_into(out)?;
                }
                Ok(())
            }
            primitive => {
                out.push(primitive.clone());
                Ok(())
            }
        }
    }
}

/// Inverse of a sequence: each operation inverted, in reverse order.
pub fn inverse_sequence(ops: &[GateOp]) -> IrResult<Vec<GateOp>> {
    ops.iter().rev().map(GateOp::inverse).collect()
}
