//! qsweep Local Statevector Simulator
//!
//! Exact statevector simulation of qsweep circuits, used for the `simulate`
//! execution mode and for checking algorithm families in tests. Conjugation
//! blocks are expanded on the fly; mid-circuit measurement and reset collapse
//! the state.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//!
//! # Example
//!
//! ```ignore
//! use qsweep_adapter_sim::SimulatorBackend;
//! use qsweep_hal::Backend;
//!
//! let backend = SimulatorBackend::new().with_seed(7);
//! let result = backend.execute(circuit).await?;
//! println!("{}", result.outcome);
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::Statevector;
