//! Simulation engine: baseline frequency runs, betting runs and run-set
//! averaging.
//!
//! Each run owns a wheel derived from (master seed, run index), so a run
//! set comes out identical whether it is generated on one thread or
//! spread over the rayon pool.

pub mod aggregate;
pub mod betting;
pub mod frequency;

use rayon::prelude::*;
use tracing::info;

use crate::types::{FrequencyRecord, Histogram, Pocket};
use crate::wheel::{self, Wheel};
use aggregate::{AveragedBet, AveragedFrequency};
use betting::{BettingConfig, BettingRun};

/// Use the configured seed, or draw one and log it so the run set can be
/// replayed.
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    match configured {
        Some(seed) => seed,
        None => {
            let seed = wheel::entropy_seed();
            info!(seed, "No seed configured, drew one from entropy");
            seed
        }
    }
}

/// Map every run index through `run_one`, in order.
fn collect_runs<T, F>(runs: usize, parallel: bool, run_one: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..runs).into_par_iter().map(run_one).collect()
    } else {
        (0..runs).map(run_one).collect()
    }
}

// ---------------------------------------------------------------------------
// Baseline
// ---------------------------------------------------------------------------

/// Every baseline run plus its histogram and the averaged views.
#[derive(Debug, Clone)]
pub struct FrequencyRunSet {
    pub target: Pocket,
    pub runs: Vec<Vec<FrequencyRecord>>,
    pub histograms: Vec<Histogram>,
    pub averaged: Vec<AveragedFrequency>,
    pub averaged_histogram: Histogram,
}

pub fn frequency_run_set(seed: u64, runs: usize, trials: usize, target: Pocket, parallel: bool) -> FrequencyRunSet {
    info!(seed, runs, trials, target, parallel, "Generating baseline run set");

    let run_records = collect_runs(runs, parallel, |run| {
        let mut wheel = Wheel::for_run(seed, run);
        frequency::run_frequency(&mut wheel, trials, target)
    });

    let histograms: Vec<Histogram> = run_records
        .iter()
        .map(|records| Histogram::from_outcomes(records.iter().map(|r| r.outcome)))
        .collect();

    FrequencyRunSet {
        target,
        averaged: aggregate::average_frequency(&run_records),
        averaged_histogram: aggregate::average_histograms(&histograms),
        runs: run_records,
        histograms,
    }
}

// ---------------------------------------------------------------------------
// Betting
// ---------------------------------------------------------------------------

/// Every betting run plus the averaged trajectory and outcome histogram.
#[derive(Debug, Clone)]
pub struct BettingRunSet {
    pub config: BettingConfig,
    pub runs: Vec<BettingRun>,
    pub averaged: Vec<AveragedBet>,
    pub averaged_histogram: Histogram,
}

impl BettingRunSet {
    pub fn bankrupt_count(&self) -> usize {
        self.runs.iter().filter(|r| r.summary.bankrupt).count()
    }
}

pub fn betting_run_set(seed: u64, runs: usize, config: &BettingConfig, parallel: bool) -> BettingRunSet {
    info!(
        seed,
        runs,
        trials = config.trials,
        strategy = %config.strategy,
        mode = %config.capital_mode,
        parallel,
        "Generating betting run set"
    );

    let played = collect_runs(runs, parallel, |run| {
        let mut wheel = Wheel::for_run(seed, run);
        betting::run_strategy(&mut wheel, config)
    });

    let trajectories: Vec<_> = played.iter().map(|r| r.records.clone()).collect();
    let histograms: Vec<Histogram> = played.iter().map(|r| Histogram::from_outcomes(r.outcomes())).collect();

    let set = BettingRunSet {
        config: config.clone(),
        averaged: aggregate::average_bets(&trajectories),
        averaged_histogram: aggregate::average_histograms(&histograms),
        runs: played,
    };

    info!(
        runs = set.runs.len(),
        bankrupt = set.bankrupt_count(),
        "Betting run set complete"
    );

    set
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
