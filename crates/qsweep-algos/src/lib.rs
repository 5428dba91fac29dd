//! qsweep Algorithm Families
//!
//! Parametric circuit builders for three of the four swept families, plus the
//! catalog and runner that treat all four uniformly:
//!
//! - [`grover`]: search for the alternating `0101...` pattern
//! - [`qpe`]: phase estimation of `Rz(θ)` with an inverse Fourier transform
//! - [`vqe`]: fixed-angle excitation ansatz for H₂, LiH and BeH₂
//! - Heisenberg XXX evolution lives in `qsweep-sim`
//!
//! Every builder allocates its registers through
//! [`CircuitBuilder::scoped`](qsweep_ir::CircuitBuilder::scoped), so each
//! register is released, and each qubit reset, on every exit path.
//!
//! # Example
//!
//! ```rust
//! use qsweep_algos::{SweepPlan, catalog, find};
//!
//! let entries = catalog(&SweepPlan::default());
//! let entry = find(&entries, "qpe_3").unwrap();
//! let circuit = entry.build().unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//! assert_eq!(circuit.num_results(), 3);
//! ```

pub mod catalog;
pub mod error;
pub mod grover;
pub mod params;
pub mod qpe;
pub mod runner;
pub mod vqe;

pub use catalog::{Entry, Readout, SweepPlan, catalog, find};
pub use error::{AlgoError, AlgoResult};
pub use params::{AlgorithmParameters, Family, GroverParams, QpeParams, VqeParams};
pub use runner::{RunReport, estimation_request, run_entry};
pub use vqe::Molecule;
