//! qsweep Circuit Primitives
//!
//! This crate provides the gate primitives, scoped qubit registers and
//! circuit representation shared by every algorithm family in qsweep.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses one wire
//! - **Registers**: [`QubitRegister`] is an owned, fixed-size run of qubits handed out
//!   by the [`QubitAllocator`] arena and released (reset) by the scope that created it
//! - **Gates**: [`Axis`] rotations and [`FixedGate`]s, any of which may be multi-controlled
//! - **Operations**: [`GateOp`], including the [`GateOp::Conjugation`] block
//! - **Builder**: [`CircuitBuilder`] records operations, enforces register scoping
//! - **Circuit**: [`Circuit`], the finished artifact consumed by execution
//! - **Readout**: [`MeasurementOutcome`] holds result bits in recording order
//!
//! # Example: Conjugation Inside a Scoped Register
//!
//! ```rust
//! use qsweep_ir::{CircuitBuilder, GateOp};
//!
//! let mut builder = CircuitBuilder::new("zz_phase");
//! builder
//!     .scoped(2, |b, reg| {
//!         // CX; Rz; CX
//!         b.conjugate(
//!             |b| {
//!                 b.cx(reg[0], reg[1])?;
//!                 Ok(())
//!             },
//!             |b| {
//!                 b.rz(0.5, reg[1])?;
//!                 Ok(())
//!             },
//!         )?;
//!         b.measure_register(reg)?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let circuit = builder.finish().unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_results(), 2);
//!
//! let names: Vec<_> = circuit.flatten().unwrap().iter().map(GateOp::name).collect();
//! assert_eq!(names[..3], ["cx", "rz", "cx"]);
//! ```
//!
//! # Errors
//!
//! Every failure is an [`IrError`] whose [`IrError::kind`] is one of
//! [`ErrorKind::Parameter`], [`ErrorKind::Construction`] or
//! [`ErrorKind::ResourceLifecycle`]. All of them are raised while the
//! circuit is being built; a failed build produces no circuit.

pub mod builder;
pub mod circuit;
pub mod counts;
pub mod dag;
pub mod error;
pub mod gate;
pub mod op;
pub mod outcome;
pub mod qubit;
pub mod register;

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use counts::LogicalCounts;
pub use dag::{CircuitDag, NodeIndex};
pub use error::{ErrorKind, IrError, IrResult};
pub use gate::{Axis, FixedGate};
pub use op::{GateOp, inverse_sequence};
pub use outcome::MeasurementOutcome;
pub use qubit::QubitId;
pub use register::{AllocatorStats, QubitAllocator, QubitRegister};
