//! Run command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use qsweep_algos::{catalog, estimation_request, find, run_entry};
use qsweep_hal::ExecutionMode;

use super::common::{print_json, resolve_profiles, simulator};
use crate::config::SweepConfig;

/// Execute the run command.
///
/// Simulate mode prints the run report; estimate mode prints the
/// estimation request for the external service.
pub async fn execute(
    config: &SweepConfig,
    name: &str,
    mode: ExecutionMode,
    profiles: &[String],
) -> Result<()> {
    let entries = catalog(&config.plan());
    let entry = find(&entries, name)?;

    eprintln!(
        "{} {} {} ({})",
        style("→").cyan().bold(),
        if mode == ExecutionMode::Simulate { "Simulating" } else { "Estimating" },
        style(&entry.name).green(),
        entry.family()
    );

    match mode {
        ExecutionMode::Simulate => {
            let backend = simulator(config);

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Simulating...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let report = run_entry(entry, mode, &backend, None, &[]).await;
            spinner.finish_and_clear();

            print_json(&report?)
        }
        ExecutionMode::Estimate => {
            let profiles = resolve_profiles(profiles)?;
            let request = estimation_request(entry, &profiles)?;
            println!("{}", request.to_json()?);
            Ok(())
        }
    }
}
