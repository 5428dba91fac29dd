//! Wire-dependency graph of a flattened circuit.

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::FxHashMap;

use crate::error::{IrError, IrResult};
use crate::op::GateOp;
use crate::qubit::QubitId;

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Dependency graph over primitive operations.
///
/// Each node is one operation; an edge `a → b` labelled with qubit `q` means
/// `b` is the next operation on `q` after `a`. Conjugation blocks must be
/// expanded before they are added.
#[derive(Debug, Default)]
pub struct CircuitDag {
    graph: DiGraph<GateOp, QubitId, u32>,
    /// Last node on each wire.
    wire_front: FxHashMap<QubitId, NodeIndex>,
}

impl CircuitDag {
    /// Create an empty DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a DAG from a flattened operation sequence.
    pub fn from_ops(ops: &[GateOp]) -> IrResult<Self> {
        let mut dag = Self::new();
        for op in ops {
            dag.apply(op.clone())?;
        }
        Ok(dag)
    }

    /// Append an operation after everything already on its wires.
    pub fn apply(&mut self, op: GateOp) -> IrResult<NodeIndex> {
        if matches!(op, GateOp::Conjugation { .. }) {
            return Err(IrError::InvalidDag(
                "conjugation blocks must be expanded before building the DAG".into(),
            ));
        }
        let qubits = op.qubits();
        let node = self.graph.add_node(op);
        for q in qubits {
            if let Some(prev) = self.wire_front.insert(q, node) {
                self.graph.add_edge(prev, node, q);
            }
        }
        Ok(node)
    }

    /// Number of operation nodes.
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Length of the longest dependency chain.
    pub fn depth(&self) -> usize {
        let Ok(order) = toposort(&self.graph, None) else {
            return 0;
        };
        let mut layer: Vec<usize> = vec![0; self.graph.node_count()];
        let mut depth = 0;
        for node in order {
            let l = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|p| layer[p.index()])
                .max()
                .unwrap_or(0)
                + 1;
            layer[node.index()] = l;
            depth = depth.max(l);
        }
        depth
    }
}
