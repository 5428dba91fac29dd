//! Circuit construction.
//!
//! [`CircuitBuilder`] records [`GateOp`]s in program order. It owns the
//! [`QubitAllocator`], so every gate is checked against the set of live
//! qubits as it is recorded. Two structured primitives sit on top of the
//! plain gate methods:
//!
//! - [`CircuitBuilder::scoped`] allocates a register for the duration of a
//!   closure and releases it on every exit path;
//! - [`CircuitBuilder::conjugate`] records a `setup; body; inverse(setup)`
//!   block as a single [`GateOp::Conjugation`].

use tracing::warn;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::{Axis, FixedGate};
use crate::op::GateOp;
use crate::qubit::QubitId;
use crate::register::{AllocatorStats, QubitAllocator, QubitRegister};

/// Records operations and owns the qubit arena for one circuit.
#[derive(Debug)]
pub struct CircuitBuilder {
    name: String,
    allocator: QubitAllocator,
    /// Operations of the innermost open frame.
    current: Vec<GateOp>,
}

impl CircuitBuilder {
    /// Create an empty builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allocator: QubitAllocator::new(),
            current: Vec::new(),
        }
    }

    /// Name of the circuit under construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registers currently live.
    pub fn live_registers(&self) -> usize {
        self.allocator.live_registers()
    }

    /// Number of distinct qubits handed out so far.
    pub fn width(&self) -> usize {
        self.allocator.width() as usize
    }

    /// Allocation statistics so far.
    pub fn allocator_stats(&self) -> AllocatorStats {
        self.allocator.stats()
    }

    /// Operations recorded so far in the current frame.
    pub fn ops(&self) -> &[GateOp] {
        &self.current
    }

    // =========================================================================
    // Registers
    // =========================================================================

    /// Allocate `n` qubits in |0⟩. The caller must pass the handle back to
    /// [`release`](Self::release); prefer [`scoped`](Self::scoped).
    pub fn allocate(&mut self, n: usize) -> IrResult<QubitRegister> {
        self.allocator.allocate(n)
    }

    /// Reset every qubit of `register` and return it to the arena.
    pub fn release(&mut self, register: QubitRegister) -> IrResult<()> {
        let qubits = self.allocator.release(register)?;
        self.current
            .extend(qubits.into_iter().map(|target| GateOp::Reset { target }));
        Ok(())
    }

    /// Run `body` with a fresh register of `n` qubits.
    ///
    /// The register is released after `body` returns, whether it succeeded or
    /// not. Registers `body` allocated and left live are released first, and
    /// turn a successful body into a lifecycle error. An error from `body`
    /// takes precedence over a release error.
    pub fn scoped<T, F>(&mut self, n: usize, body: F) -> IrResult<T>
    where
        F: FnOnce(&mut Self, &QubitRegister) -> IrResult<T>,
    {
        let register = self.allocate(n)?;
        let depth = self.allocator.live_registers();
        let result = body(self, &register);

        let strays = self.allocator.unwind_to(depth);
        for (scope, qubits) in &strays {
            warn!(scope = *scope, n = qubits.len(), "releasing register left live by scope body");
            self.current
                .extend(qubits.iter().map(|&target| GateOp::Reset { target }));
        }
        let result = match result {
            Ok(_) if !strays.is_empty() => Err(IrError::UnreleasedRegisters {
                count: strays.len(),
                context: "scoped register",
            }),
            other => other,
        };

        let released = self.release(register);
        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(release_err)) => {
                warn!(error = %release_err, "register release failed after aborted scope");
                Err(e)
            }
        }
    }

    // =========================================================================
    // Conjugation
    // =========================================================================

    /// Record `setup; body; inverse(setup)` as one conjugation block.
    ///
    /// Fails with a construction error if `setup` records a measurement or
    /// reset (including the reset of a register released inside it), and with
    /// a lifecycle error if either closure leaves a register it allocated live.
    pub fn conjugate<S, B>(&mut self, setup: S, body: B) -> IrResult<&mut Self>
    where
        S: FnOnce(&mut Self) -> IrResult<()>,
        B: FnOnce(&mut Self) -> IrResult<()>,
    {
        let setup_ops = self.record(setup)?;
        if let Some(op) = setup_ops.iter().find(|op| !op.is_unitary()) {
            return Err(IrError::NonInvertibleSetup { op: op.name() });
        }
        let body_ops = self.record(body)?;
        self.current.push(GateOp::Conjugation {
            setup: setup_ops,
            body: body_ops,
        });
        Ok(self)
    }

    /// Run `f` against a fresh frame and return what it recorded.
    fn record<F>(&mut self, f: F) -> IrResult<Vec<GateOp>>
    where
        F: FnOnce(&mut Self) -> IrResult<()>,
    {
        let live_before = self.allocator.live_registers();
        let outer = std::mem::take(&mut self.current);
        let result = f(self);
        let recorded = std::mem::replace(&mut self.current, outer);
        result?;

        let live_after = self.allocator.live_registers();
        if live_after > live_before {
            return Err(IrError::UnreleasedRegisters {
                count: live_after - live_before,
                context: "conjugation block",
            });
        }
        Ok(recorded)
    }

    // =========================================================================
    // Generic application
    // =========================================================================

    /// Validate and record an arbitrary operation.
    pub fn apply(&mut self, op: GateOp) -> IrResult<&mut Self> {
        self.validate(&op)?;
        self.current.push(op);
        Ok(self)
    }

    fn validate(&self, op: &GateOp) -> IrResult<()> {
        let name = op.name();
        match op {
            GateOp::Rotation { target, .. }
            | GateOp::Measure { target }
            | GateOp::Reset { target } => self.check_operands(&name, &[*target]),
            GateOp::ControlledRotation {
                controls, target, ..
            } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                self.check_operands(&name, &qubits)
            }
            GateOp::Fixed {
                gate,
                controls,
                targets,
            } => {
                if targets.len() != gate.num_targets() {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: name,
                        expected: gate.num_targets(),
                        got: targets.len(),
                    });
                }
                let qubits: Vec<_> = controls.iter().chain(targets).copied().collect();
                self.check_operands(&name, &qubits)
            }
            GateOp::Conjugation { setup, body } => {
                if let Some(bad) = setup.iter().find(|op| !op.is_unitary()) {
                    return Err(IrError::NonInvertibleSetup { op: bad.name() });
                }
                setup
                    .iter()
                    .chain(body)
                    .try_for_each(|inner| self.validate(inner))
            }
        }
    }

    fn check_operands(&self, gate_name: &str, qubits: &[QubitId]) -> IrResult<()> {
        for (i, &q) in qubits.iter().enumerate() {
            if !self.allocator.is_live(q) {
                return Err(IrError::QubitNotLive {
                    qubit: q,
                    gate_name: Some(gate_name.to_string()),
                });
            }
            if qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    qubit: q,
                    gate_name: Some(gate_name.to_string()),
                });
            }
        }
        Ok(())
    }

    fn fixed(
        &mut self,
        gate: FixedGate,
        controls: &[QubitId],
        targets: &[QubitId],
    ) -> IrResult<&mut Self> {
        self.apply(GateOp::Fixed {
            gate,
            controls: controls.to_vec(),
            targets: targets.to_vec(),
        })
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::H, &[], &[qubit])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::X, &[], &[qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::Y, &[], &[qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::Z, &[], &[qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::S, &[], &[qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::Sdg, &[], &[qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::T, &[], &[qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::Tdg, &[], &[qubit])
    }

    /// Apply the same fixed gate to each qubit in turn.
    pub fn apply_each(&mut self, gate: FixedGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        for &q in qubits {
            self.fixed(gate, &[], &[q])?;
        }
        Ok(self)
    }

    /// Apply a rotation about `axis`.
    pub fn rotate(&mut self, axis: Axis, angle: f64, target: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::Rotation {
            axis,
            angle,
            target,
        })
    }

    /// Apply Rx rotation.
    pub fn rx(&mut self, angle: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.rotate(Axis::X, angle, qubit)
    }

    /// Apply Ry rotation.
    pub fn ry(&mut self, angle: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.rotate(Axis::Y, angle, qubit)
    }

    /// Apply Rz rotation.
    pub fn rz(&mut self, angle: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.rotate(Axis::Z, angle, qubit)
    }

    /// Apply R1 phase rotation.
    pub fn r1(&mut self, angle: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.rotate(Axis::Phase, angle, qubit)
    }

    // =========================================================================
    // Controlled gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::X, &[control], &[target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::Z, &[control], &[target])
    }

    /// Apply Toffoli gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::X, &[c1, c2], &[target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::Swap, &[], &[q1, q2])
    }

    /// Apply X controlled on every qubit in `controls`.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::X, controls, &[target])
    }

    /// Apply Z controlled on every qubit in `controls`.
    pub fn mcz(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.fixed(FixedGate::Z, controls, &[target])
    }

    /// Apply a rotation controlled on every qubit in `controls`.
    pub fn controlled_rotate(
        &mut self,
        axis: Axis,
        angle: f64,
        controls: &[QubitId],
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(GateOp::ControlledRotation {
            axis,
            angle,
            controls: controls.to_vec(),
            target,
        })
    }

    /// Apply controlled R1 phase rotation.
    pub fn cr1(&mut self, angle: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.controlled_rotate(Axis::Phase, angle, &[control], target)
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure one qubit, appending one result bit.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::Measure { target: qubit })
    }

    /// Measure every qubit of `register` in index order.
    pub fn measure_register(&mut self, register: &QubitRegister) -> IrResult<&mut Self> {
        for q in register.iter() {
            self.measure(q)?;
        }
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(GateOp::Reset { target: qubit })
    }

    // =========================================================================
    // Completion
    // =========================================================================

    /// Finish construction.
    ///
    /// Fails if any register is still live.
    pub fn finish(self) -> IrResult<Circuit> {
        let live = self.allocator.live_registers();
        if live > 0 {
            return Err(IrError::UnreleasedRegisters {
                count: live,
                context: "circuit construction",
            });
        }
        Ok(Circuit::from_parts(
            self.name,
            self.allocator.width(),
            self.current,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_bell_pair() {
        let mut b = CircuitBuilder::new("bell");
        b.scoped(2, |b, reg| {
            b.h(reg[0])?.cx(reg[0], reg[1])?;
            b.measure_register(reg)?;
            Ok(())
        })
        .unwrap();
        let circuit = b.finish().unwrap();

        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_results(), 2);
        let names: Vec<_> = circuit.ops().iter().map(GateOp::name).collect();
        assert_eq!(
            names,
            vec!["h", "cx", "measure", "measure", "reset", "reset"]
        );
    }

    #[test]
    fn test_use_after_release() {
        let mut b = CircuitBuilder::new("stale");
        let reg = b.allocate(1).unwrap();
        let q = reg[0];
        b.release(reg).unwrap();
        let err = b.h(q).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLifecycle);
    }

    #[test]
    fn test_duplicate_operand() {
        let mut b = CircuitBuilder::new("dup");
        let err = b
            .scoped(1, |b, reg| {
                b.cx(reg[0], reg[0])?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
        assert_eq!(b.live_registers(), 0);
    }

    #[test]
    fn test_measurement_in_setup_rejected() {
        let mut b = CircuitBuilder::new("bad");
        let err = b
            .scoped(1, |b, reg| {
                b.conjugate(
                    |b| {
                        b.measure(reg[0])?;
                        Ok(())
                    },
                    |b| {
                        b.x(reg[0])?;
                        Ok(())
                    },
                )?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
    }

    #[test]
    fn test_unreleased_register_in_conjugation() {
        let mut b = CircuitBuilder::new("leak");
        let outer = b.allocate(1).unwrap();
        let q = outer[0];
        let err = b
            .conjugate(
                |b| {
                    b.h(q)?;
                    Ok(())
                },
                |b| {
                    let scratch = b.allocate(1)?;
                    b.cx(q, scratch[0])?;
                    Ok(())
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::UnreleasedRegisters {
                count: 1,
                context: "conjugation block"
            }
        ));
    }

    #[test]
    fn test_finish_with_live_register() {
        let mut b = CircuitBuilder::new("leak");
        let _reg = b.allocate(2).unwrap();
        let err = b.finish().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceLifecycle);
    }

    #[test]
    fn test_swap_target_count() {
        let mut b = CircuitBuilder::new("swap");
        b.scoped(2, |b, reg| {
            let err = b
                .apply(GateOp::Fixed {
                    gate: FixedGate::Swap,
                    controls: vec![],
                    targets: vec![reg[0]],
                })
                .unwrap_err();
            assert!(matches!(err, IrError::QubitCountMismatch { .. }));
            Ok(())
        })
        .unwrap();
    }
}
