//! qsweep Execution Seam
//!
//! A built [`Circuit`](qsweep_ir::Circuit) goes one of two ways:
//!
//! - to a [`Backend`], which simulates it and returns the measurement outcome;
//! - to a [`ResourceEstimator`], a client for an external service that
//!   reports physical resources for each [`HardwareProfile`].
//!
//! [`ExecutionMode`] selects between them. The estimation service is not
//! implemented here; [`EstimationRequest`] is the payload handed to it.
//!
//! # Hardware Profiles
//!
//! | Profile | QEC | Physical error rate | Gate time | Error budget |
//! |---------|-----|---------------------|-----------|--------------|
//! | `qubit_gate_ns_e3` | surface code | 1e-3 | 1 ns | 0.001 |
//! | `qubit_gate_ns_e4` | surface code | 1e-4 | 1 ns | 0.001 |
//!
//! # Implementing a Custom Estimator
//!
//! ```ignore
//! use async_trait::async_trait;
//! use qsweep_hal::{HalResult, HardwareProfile, PhysicalEstimate, ResourceEstimator};
//! use qsweep_ir::Circuit;
//!
//! struct ServiceClient { /* ... */ }
//!
//! #[async_trait]
//! impl ResourceEstimator for ServiceClient {
//!     fn name(&self) -> &str { "service" }
//!
//!     async fn estimate(
//!         &self,
//!         circuit: Circuit,
//!         profiles: &[HardwareProfile],
//!     ) -> HalResult<Vec<PhysicalEstimate>> {
//!         // Submit the circuit and collect one estimate per profile.
//!         todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod error;
pub mod estimator;
pub mod mode;
pub mod profile;

pub use backend::{Backend, Capabilities, ExecutionResult};
pub use error::{HalError, HalResult};
pub use estimator::{EstimationRequest, PhysicalEstimate, ResourceEstimator};
pub use mode::ExecutionMode;
pub use profile::{HardwareProfile, QecScheme};
