//! List command implementation.

use anyhow::Result;
use console::style;

use qsweep_algos::Family;

use super::common::entries;
use crate::config::SweepConfig;

/// Execute the list command.
pub fn execute(config: &SweepConfig, family: Option<Family>) -> Result<()> {
    let entries = entries(config, family);
    eprintln!(
        "{} {} catalog entries\n",
        style("qsweep").cyan().bold(),
        entries.len()
    );

    for entry in &entries {
        let circuit = entry.build()?;
        let simulable = circuit.num_qubits() <= config.simulator.max_qubits as usize;
        println!(
            "{:<16} {:>4} qubits  {}",
            entry.name,
            circuit.num_qubits(),
            if simulable { "sim, re" } else { "re" }
        );
    }

    Ok(())
}
