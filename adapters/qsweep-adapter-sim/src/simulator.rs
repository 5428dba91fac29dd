//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument};

use qsweep_hal::{Backend, Capabilities, ExecutionResult, HalError, HalResult};
use qsweep_ir::Circuit;

use crate::statevector::Statevector;

/// Default width limit; 2^20 amplitudes is 16 MiB.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local simulator backend.
///
/// Executes a circuit once on a fresh statevector and reports the bits its
/// measurements produced, in recording order.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    /// Seed for measurement sampling; entropy when unset.
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            seed: None,
        }
    }

    /// Make measurement sampling reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        debug!(num_qubits, ops = circuit.ops().len(), "starting simulation");

        let mut rng = self.rng();
        let mut sv = Statevector::new(num_qubits);
        let outcome = sv.run(circuit.ops(), &mut rng)?;

        let elapsed = start.elapsed();
        debug!(?elapsed, bits = outcome.len(), "simulation completed");

        Ok(ExecutionResult::new(outcome).with_execution_time(elapsed.as_millis() as u64))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit))]
    async fn execute(&self, circuit: Circuit) -> HalResult<ExecutionResult> {
        let max_qubits = self.capabilities.num_qubits;
        if circuit.num_qubits() > max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                max_qubits
            )));
        }
        self.run_simulation(&circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsweep_ir::CircuitBuilder;

    fn ghz(n: usize) -> Circuit {
        let mut b = CircuitBuilder::new("ghz");
        b.scoped(n, |b, reg| {
            b.h(reg[0])?;
            for i in 1..n {
                b.cx(reg[0], reg[i])?;
            }
            b.measure_register(reg)?;
            Ok(())
        })
        .unwrap();
        b.finish().unwrap()
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert_eq!(backend.name(), "simulator");
    }

    #[tokio::test]
    async fn test_simulator_ghz_state() {
        for seed in 0..20 {
            let backend = SimulatorBackend::new().with_seed(seed);
            let result = backend.execute(ghz(3)).await.unwrap();
            let ones = result.outcome.count_ones();
            assert!(ones == 0 || ones == 3, "GHZ produced {}", result.outcome);
        }
    }

    #[tokio::test]
    async fn test_simulator_seed_is_reproducible() {
        let a = SimulatorBackend::new().with_seed(42);
        let b = SimulatorBackend::new().with_seed(42);
        let ra = a.execute(ghz(4)).await.unwrap();
        let rb = b.execute(ghz(4)).await.unwrap();
        assert_eq!(ra.outcome, rb.outcome);
        assert!(ra.execution_time_ms.is_some());
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);
        let result = backend.execute(ghz(6)).await;

        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }
}
