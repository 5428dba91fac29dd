//! Logical resource counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::dag::CircuitDag;
use crate::error::IrResult;
use crate::op::GateOp;

/// Summary of a flattened circuit as seen by a resource estimator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalCounts {
    /// Circuit width.
    pub num_qubits: usize,
    /// Longest dependency chain.
    pub depth: usize,
    /// Primitive operations after expansion.
    pub total_ops: usize,
    /// Rotations by an arbitrary angle, controlled or not.
    pub rotation_count: usize,
    /// Gates with two or more controls.
    pub multi_controlled_count: usize,
    /// Measurements.
    pub measurement_count: usize,
    /// Resets.
    pub reset_count: usize,
    /// Per-gate-name counts.
    pub gates: BTreeMap<String, usize>,
}

impl LogicalCounts {
    /// Count the operations of `circuit`.
    pub fn from_circuit(circuit: &Circuit) -> IrResult<Self> {
        let flat = circuit.flatten()?;
        let mut counts = LogicalCounts {
            num_qubits: circuit.num_qubits(),
            depth: CircuitDag::from_ops(&flat)?.depth(),
            total_ops: flat.len(),
            ..Default::default()
        };
        for op in &flat {
            match op {
                GateOp::Rotation { .. } | GateOp::ControlledRotation { .. } => {
                    counts.rotation_count += 1;
                }
                GateOp::Measure { .. } => counts.measurement_count += 1,
                GateOp::Reset { .. } => counts.reset_count += 1,
                _ => {}
            }
            if op.controls().len() >= 2 {
                counts.multi_controlled_count += 1;
            }
            *counts.gates.entry(op.name()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Count for a single gate name; zero if absent.
    pub fn count(&self, name: &str) -> usize {
        self.gates.get(name).copied().unwrap_or(0)
    }
}
