//! Betting-strategy simulator.
//!
//! `strategy -c <trials> -n <runs> -s <m|d|f|o> -a <f|i>`: plays each run
//! betting on red under the chosen progression and reports how the
//! bankroll fared.

use anyhow::Result;
use std::io::{self, Write};
use tracing::info;

use roulette_sim::cli;
use roulette_sim::config::AppConfig;
use roulette_sim::report::{self, export};
use roulette_sim::simulation::{self, betting::BettingConfig};

fn main() -> Result<()> {
    cli::init_logging();

    let argv: Vec<String> = std::env::args().collect();
    let args = match cli::parse_strategy_args(&argv) {
        Ok(args) => args,
        Err(e) => cli::exit_with_usage(&cli::strategy_usage(&argv), &e),
    };

    let cfg = AppConfig::from_env()?;
    let seed = simulation::resolve_seed(cfg.seed);

    let betting = BettingConfig {
        strategy: args.strategy,
        capital_mode: args.capital,
        base_bet: cfg.strategy.base_bet,
        initial_capital: cfg.strategy.initial_capital,
        trials: args.trials as usize,
    };

    let set = simulation::betting_run_set(seed, args.runs as usize, &betting, cfg.parallel);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_betting_summary(&mut out, &set, seed, cfg.report.show_runs)?;
    writeln!(out)?;
    report::write_histogram(&mut out, "Averaged outcome frequencies", &set.averaged_histogram)?;

    if let Some(path) = cfg.report.export_path.as_deref() {
        export::save_export(&export::SimulationExport::betting(seed, &set), path)?;
    }

    info!(
        strategy = %betting.strategy,
        bankrupt = set.bankrupt_count(),
        "Strategy simulation finished"
    );
    Ok(())
}
