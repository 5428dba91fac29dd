//! qsweep Command-Line Interface
//!
//! Lists the benchmark catalog and runs entries either on the local
//! state-vector simulator or as resource-estimation hand-offs.
//!
//! ```text
//! qsweep list --family qpe
//! qsweep run qpe_4 --mode simulate
//! qsweep sweep --family vqe --mode estimate --profile e3
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{list, run, sweep};
use config::SweepConfig;
use qsweep_algos::Family;
use qsweep_hal::ExecutionMode;

/// qsweep - parametric quantum benchmark circuits
#[derive(Parser)]
#[command(name = "qsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "QSWEEP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog entries
    List {
        /// Only entries of this family (grover, heisenberg, qpe, vqe)
        #[arg(short, long)]
        family: Option<Family>,
    },

    /// Run one catalog entry
    Run {
        /// Entry name, e.g. grover_5 or vqe_lih
        entry: String,

        /// Execution mode (simulate, estimate)
        #[arg(short, long, default_value = "simulate")]
        mode: ExecutionMode,

        /// Hardware profile for estimate mode (e3, e4); repeatable
        #[arg(short, long = "profile")]
        profiles: Vec<String>,
    },

    /// Run every entry, or every entry of one family
    Sweep {
        /// Only entries of this family
        #[arg(short, long)]
        family: Option<Family>,

        /// Execution mode (simulate, estimate)
        #[arg(short, long, default_value = "simulate")]
        mode: ExecutionMode,

        /// Hardware profile for estimate mode (e3, e4); repeatable
        #[arg(short, long = "profile")]
        profiles: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SweepConfig::load(cli.config.as_deref());

    // Setup logging
    let filter = match cli.verbose {
        0 => config
            .as_ref()
            .map_or("warn", |c| c.logging.level.as_str())
            .to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match config {
        Ok(config) => match cli.command {
            Commands::List { family } => list::execute(&config, family),

            Commands::Run {
                entry,
                mode,
                profiles,
            } => run::execute(&config, &entry, mode, &profiles).await,

            Commands::Sweep {
                family,
                mode,
                profiles,
            } => sweep::execute(&config, family, mode, &profiles).await,
        },
        Err(e) => Err(e.into()),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
