//! Baseline frequency simulator.
//!
//! `frequency -c <trials> -n <runs> -e <target>`: spins the wheel, tracks
//! the running estimators for one pocket, averages them over the runs and
//! prints the result next to the expected values.

use anyhow::Result;
use std::io::{self, Write};
use tracing::info;

use roulette_sim::cli;
use roulette_sim::config::AppConfig;
use roulette_sim::report::{self, export};
use roulette_sim::simulation;

fn main() -> Result<()> {
    cli::init_logging();

    let argv: Vec<String> = std::env::args().collect();
    let args = match cli::parse_frequency(&argv) {
        Ok(args) => args,
        Err(e) => cli::exit_with_usage(&cli::frequency_usage(&argv), &e),
    };

    let cfg = AppConfig::from_env()?;
    let seed = simulation::resolve_seed(cfg.seed);

    let set = simulation::frequency_run_set(
        seed,
        args.runs as usize,
        args.trials as usize,
        args.target,
        cfg.parallel,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_frequency_summary(&mut out, &set, seed, cfg.report.show_runs)?;
    writeln!(out)?;
    report::write_histogram(&mut out, "Averaged outcome frequencies", &set.averaged_histogram)?;

    if let Some(path) = cfg.report.export_path.as_deref() {
        export::save_export(&export::SimulationExport::frequency(seed, &set), path)?;
    }

    info!(runs = set.runs.len(), "Baseline simulation finished");
    Ok(())
}
