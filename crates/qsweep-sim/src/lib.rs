//! qsweep Heisenberg XXX time-evolution circuits.
//!
//! Builds first-order Trotter circuits for the open Heisenberg chain
//!
//!   H = J · Σ_i ( XX + YY + ZZ )_{i,i+1}
//!
//! and reduces the measured spins to a magnetization.
//!
//! # Quick start
//!
//! ```rust
//! use qsweep_sim::{HeisenbergChain, evolution_circuit, magnetization};
//! use qsweep_ir::MeasurementOutcome;
//!
//! let chain = HeisenbergChain::new(4, 1.0, 0.5, 5.0).unwrap();
//! let circuit = evolution_circuit(&chain).unwrap();
//! assert_eq!(circuit.num_qubits(), 4);
//!
//! let outcome = MeasurementOutcome::from_bitstring("1000").unwrap();
//! assert_eq!(magnetization(&outcome, 4).unwrap(), 0.25);
//! ```

pub mod error;
pub mod hamiltonian;
pub mod readout;
pub mod synthesis;
pub mod trotter;

pub use error::{SimError, SimResult};
pub use hamiltonian::{HeisenbergChain, PauliOp};
pub use readout::magnetization;
pub use synthesis::append_pauli_pair;
pub use trotter::{append_trotter_step, evolution_circuit};
