//! Runner dispatch against the local backend and a mock estimator.

use async_trait::async_trait;
use std::sync::Mutex;

use qsweep_adapter_sim::SimulatorBackend;
use qsweep_algos::{
    AlgoError, AlgorithmParameters, Entry, GroverParams, Readout, RunReport, SweepPlan, catalog,
    estimation_request, find, run_entry,
};
use qsweep_hal::{
    ExecutionMode, HalError, HalResult, HardwareProfile, PhysicalEstimate, ResourceEstimator,
};
use qsweep_ir::Circuit;

/// Records what it was asked and answers from the logical counts.
#[derive(Default)]
struct MockEstimator {
    seen: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl ResourceEstimator for MockEstimator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn estimate(
        &self,
        circuit: Circuit,
        profiles: &[HardwareProfile],
    ) -> HalResult<Vec<PhysicalEstimate>> {
        let counts = circuit.logical_counts()?;
        self.seen
            .lock()
            .unwrap()
            .push((circuit.name().to_string(), counts.num_qubits));
        Ok(profiles
            .iter()
            .map(|p| PhysicalEstimate {
                profile: p.name.clone(),
                physical_qubits: counts.num_qubits as u64 * 1000,
                runtime_ns: counts.total_ops as u64 * p.gate_time_ns as u64,
                code_distance: None,
            })
            .collect())
    }
}

/// Always refuses.
struct RefusingEstimator;

#[async_trait]
impl ResourceEstimator for RefusingEstimator {
    fn name(&self) -> &str {
        "refusing"
    }

    async fn estimate(
        &self,
        _circuit: Circuit,
        _profiles: &[HardwareProfile],
    ) -> HalResult<Vec<PhysicalEstimate>> {
        Err(HalError::UnsupportedCircuit("mid-circuit reset".into()))
    }
}

fn small_plan() -> SweepPlan {
    SweepPlan {
        grover_sizes: vec![3],
        heisenberg_lengths: vec![3],
        qpe_sizes: vec![3],
        ..SweepPlan::default()
    }
}

#[tokio::test]
async fn simulate_every_small_entry() {
    let backend = SimulatorBackend::new().with_seed(11);
    for entry in catalog(&small_plan()) {
        let report = run_entry(&entry, ExecutionMode::Simulate, &backend, None, &[])
            .await
            .unwrap();
        let RunReport::Simulate { readout, .. } = report else {
            panic!("expected simulation report");
        };
        match readout {
            Readout::Magnetization { value } => assert!((0.0..=1.0).contains(&value)),
            Readout::Phase { error, .. } => assert!((0.0..1.0).contains(&error)),
            Readout::Search { bits, .. } => assert_eq!(bits.len(), 3),
            Readout::Ansatz { bits } => assert!(!bits.is_empty()),
        }
    }
}

#[tokio::test]
async fn simulate_too_wide_entry_fails() {
    let backend = SimulatorBackend::with_max_qubits(4);
    let entries = catalog(&SweepPlan::default());
    let entry = find(&entries, "grover_5").unwrap();
    let err = run_entry(entry, ExecutionMode::Simulate, &backend, None, &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AlgoError::Hal(HalError::CircuitTooLarge(_))));
}

#[tokio::test]
async fn estimate_hands_circuit_to_estimator() {
    let backend = SimulatorBackend::new();
    let estimator = MockEstimator::default();
    let profiles = HardwareProfile::standard();
    let entries = catalog(&SweepPlan::default());
    let entry = find(&entries, "vqe_beh2").unwrap();

    let report = run_entry(
        entry,
        ExecutionMode::Estimate,
        &backend,
        Some(&estimator),
        &profiles,
    )
    .await
    .unwrap();

    let RunReport::Estimate { entry: name, estimates } = report else {
        panic!("expected estimate report");
    };
    assert_eq!(name, "vqe_beh2");
    assert_eq!(estimates.len(), 2);
    assert_eq!(estimates[0].profile, "qubit_gate_ns_e3");
    assert_eq!(estimates[1].profile, "qubit_gate_ns_e4");
    assert_eq!(
        estimator.seen.lock().unwrap().as_slice(),
        &[("vqe_beh2".to_string(), 14)]
    );
}

#[tokio::test]
async fn estimator_failure_is_passed_through() {
    let backend = SimulatorBackend::new();
    let entry = Entry::new(AlgorithmParameters::Grover(GroverParams {
        num_qubits: 20,
        measure: false,
    }));
    let err = run_entry(
        &entry,
        ExecutionMode::Estimate,
        &backend,
        Some(&RefusingEstimator),
        &HardwareProfile::standard(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AlgoError::Hal(HalError::UnsupportedCircuit(_))));
}

#[tokio::test]
async fn estimate_without_estimator_is_unavailable() {
    let backend = SimulatorBackend::new();
    let entries = catalog(&small_plan());
    let err = run_entry(
        &entries[0],
        ExecutionMode::Estimate,
        &backend,
        None,
        &HardwareProfile::standard(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AlgoError::Hal(HalError::ServiceUnavailable(_))));
}

#[test]
fn request_payload_covers_large_sizes() {
    let entries = catalog(&SweepPlan::default());
    let entry = find(&entries, "heisenberg_50").unwrap();
    let request = estimation_request(entry, &HardwareProfile::standard()).unwrap();
    assert_eq!(request.circuit, "heisenberg_50");
    assert_eq!(request.counts.num_qubits, 50);
    // 10 steps × 49 bonds × 3 terms
    assert_eq!(request.counts.count("rz"), 1470);
}
