//! Finished circuits.

use serde::{Deserialize, Serialize};

use crate::counts::LogicalCounts;
use crate::dag::CircuitDag;
use crate::error::IrResult;
use crate::op::GateOp;

/// A finished quantum circuit.
///
/// Produced by [`CircuitBuilder::finish`](crate::CircuitBuilder::finish) and
/// handed by value to whatever executes it. Operations are kept in the
/// structured form they were recorded in; [`Circuit::flatten`] expands
/// conjugation blocks into primitives.
#[derive(Debug, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    num_results: u32,
    ops: Vec<GateOp>,
}

fn count_measurements(ops: &[GateOp]) -> u32 {
    ops.iter()
        .map(|op| match op {
            GateOp::Measure { .. } => 1,
            GateOp::Conjugation { body, .. } => count_measurements(body),
            _ => 0,
        })
        .sum()
}

impl Circuit {
    pub(crate) fn from_parts(name: String, num_qubits: u32, ops: Vec<GateOp>) -> Self {
        let num_results = count_measurements(&ops);
        Self {
            name,
            num_qubits,
            num_results,
            ops,
        }
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct qubits the circuit touches (allocator high-water mark).
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Number of measurement results the circuit produces.
    pub fn num_results(&self) -> usize {
        self.num_results as usize
    }

    /// Recorded operations, conjugations kept as blocks.
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Consume the circuit and return its operations.
    pub fn into_ops(self) -> Vec<GateOp> {
        self.ops
    }

    /// Fully expanded primitive sequence.
    pub fn flatten(&self) -> IrResult<Vec<GateOp>> {
        let mut out = Vec::with_capacity(self.ops.len());
        for op in &self.ops {
            op.expand_into(&mut out)?;
        }
        Ok(out)
    }

    /// Circuit depth over the flattened sequence.
    pub fn depth(&self) -> IrResult<usize> {
        Ok(CircuitDag::from_ops(&self.flatten()?)?.depth())
    }

    /// Gate and resource counts for hand-off to an estimator.
    pub fn logical_counts(&self) -> IrResult<LogicalCounts> {
        LogicalCounts::from_circuit(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::CircuitBuilder;

    #[test]
    fn test_flatten_and_depth() {
        let mut b = CircuitBuilder::new("ghz");
        b.scoped(3, |b, reg| {
            b.conjugate(
                |b| {
                    b.h(reg[0])?;
                    Ok(())
                },
                |b| {
                    b.z(reg[0])?;
                    Ok(())
                },
            )?;
            b.h(reg[0])?.cx(reg[0], reg[1])?.cx(reg[1], reg[2])?;
            Ok(())
        })
        .unwrap();
        let circuit = b.finish().unwrap();

        // conjugation + h + 2 cx + 3 resets
        assert_eq!(circuit.ops().len(), 7);
        let flat = circuit.flatten().unwrap();
        // h z h + h + 2 cx + 3 resets
        assert_eq!(flat.len(), 9);
        // q0: h z h h cx, q1: cx cx, q2: cx reset
        assert_eq!(circuit.depth().unwrap(), 7);
        assert_eq!(circuit.num_results(), 0);
    }
}
