//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use serde::Serialize;

use qsweep_adapter_sim::SimulatorBackend;
use qsweep_algos::{Entry, Family, catalog};
use qsweep_hal::HardwareProfile;

use crate::config::SweepConfig;

/// Catalog entries of `config`, optionally restricted to one family.
pub fn entries(config: &SweepConfig, family: Option<Family>) -> Vec<Entry> {
    catalog(&config.plan())
        .into_iter()
        .filter(|e| family.is_none_or(|f| e.family() == f))
        .collect()
}

/// Local simulator sized and seeded from the configuration.
pub fn simulator(config: &SweepConfig) -> SimulatorBackend {
    let backend = SimulatorBackend::with_max_qubits(config.simulator.max_qubits);
    match config.simulator.seed {
        Some(seed) => backend.with_seed(seed),
        None => backend,
    }
}

/// Resolve profile names; no names means both standard profiles.
pub fn resolve_profiles(names: &[String]) -> Result<Vec<HardwareProfile>> {
    if names.is_empty() {
        return Ok(HardwareProfile::standard());
    }
    names
        .iter()
        .map(|name| {
            HardwareProfile::by_name(name).with_context(|| {
                format!("Unknown hardware profile: '{name}' (expected e3, e4, qubit_gate_ns_e3 or qubit_gate_ns_e4)")
            })
        })
        .collect()
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
