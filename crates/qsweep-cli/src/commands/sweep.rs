//! Sweep command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use qsweep_algos::{AlgoError, Family, estimation_request, run_entry};
use qsweep_hal::{ExecutionMode, HalError};

use super::common::{entries, print_json, resolve_profiles, simulator};
use crate::config::SweepConfig;

/// Execute the sweep command.
///
/// In simulate mode, entries wider than the simulator are skipped with a
/// warning; every other failure stops the sweep.
pub async fn execute(
    config: &SweepConfig,
    family: Option<Family>,
    mode: ExecutionMode,
    profiles: &[String],
) -> Result<()> {
    let entries = entries(config, family);
    eprintln!(
        "{} Sweeping {} entries ({mode})",
        style("→").cyan().bold(),
        entries.len()
    );

    let progress = ProgressBar::new(entries.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    match mode {
        ExecutionMode::Simulate => {
            let backend = simulator(config);
            let mut reports = Vec::with_capacity(entries.len());
            let mut skipped = 0usize;

            for entry in &entries {
                progress.set_message(entry.name.clone());
                match run_entry(entry, mode, &backend, None, &[]).await {
                    Ok(report) => reports.push(report),
                    Err(AlgoError::Hal(HalError::CircuitTooLarge(reason))) => {
                        warn!(entry = %entry.name, %reason, "skipping entry");
                        skipped += 1;
                    }
                    Err(e) => {
                        progress.abandon();
                        return Err(e.into());
                    }
                }
                progress.inc(1);
            }
            progress.finish_and_clear();

            if skipped > 0 {
                eprintln!(
                    "  {} {skipped} entries exceed {} qubits; use --mode estimate",
                    style("!").yellow().bold(),
                    config.simulator.max_qubits
                );
            }
            print_json(&reports)
        }
        ExecutionMode::Estimate => {
            let profiles = resolve_profiles(profiles)?;
            let mut requests = Vec::with_capacity(entries.len());

            for entry in &entries {
                progress.set_message(entry.name.clone());
                requests.push(estimation_request(entry, &profiles)?);
                progress.inc(1);
            }
            progress.finish_and_clear();

            print_json(&requests)
        }
    }
}
