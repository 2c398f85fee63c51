//! Standalone Martingala game.
//!
//! One long run (up to `martingale.max_rounds`) betting on red with a
//! doubling progression, against a fixed or unbounded bank.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use tracing::info;

use roulette_sim::cli;
use roulette_sim::config::AppConfig;
use roulette_sim::report::{self, export};
use roulette_sim::simulation::{self, aggregate, betting::BettingConfig, BettingRunSet};
use roulette_sim::strategy::StrategyKind;
use roulette_sim::types::{CapitalMode, Histogram};
use roulette_sim::wheel::Wheel;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Martingala,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CapitalArg {
    Finito,
    Infinito,
}

/// Roulette simulator with the Martingala strategy.
#[derive(Parser, Debug)]
#[command(name = "martingale")]
struct Args {
    /// Strategy to use (martingala is the only one available)
    #[arg(short = 's', long = "strategy", value_enum)]
    strategy: StrategyArg,

    /// Capital type: finito (fixed) or infinito (unbounded)
    #[arg(short = 'a', long = "capital", value_enum)]
    capital: CapitalArg,
}

fn main() -> Result<()> {
    cli::init_logging();
    let args = Args::parse();

    let cfg = AppConfig::from_env()?;
    let seed = simulation::resolve_seed(cfg.seed);

    let StrategyArg::Martingala = args.strategy;
    let capital_mode = match args.capital {
        CapitalArg::Finito => CapitalMode::Fixed,
        CapitalArg::Infinito => CapitalMode::Unbounded,
    };

    let settings = &cfg.martingale;
    let betting = BettingConfig {
        strategy: StrategyKind::Martingale,
        capital_mode,
        base_bet: settings.base_bet,
        initial_capital: settings.initial_capital,
        trials: settings.max_rounds,
    };

    let mut wheel = Wheel::seeded(seed);
    let run = simulation::betting::run_strategy(&mut wheel, &betting);
    let histogram = Histogram::from_outcomes(run.outcomes());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_martingale_summary(&mut out, &run, capital_mode, settings.max_rounds)?;
    if cfg.report.show_runs {
        writeln!(out)?;
        report::write_bankroll_history(&mut out, &run, 20)?;
    }
    writeln!(out)?;
    report::write_histogram(&mut out, "Outcome frequencies (0-36)", &histogram)?;

    if let Some(path) = cfg.report.export_path.as_deref() {
        let set = BettingRunSet {
            config: betting.clone(),
            averaged: aggregate::average_bets(std::slice::from_ref(&run.records)),
            averaged_histogram: histogram,
            runs: vec![run],
        };
        export::save_export(&export::SimulationExport::betting(seed, &set), path)?;
    }

    info!(mode = %capital_mode, "Martingala game finished");
    Ok(())
}
