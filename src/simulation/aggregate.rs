//! Run-set aggregator.
//!
//! Averages trajectories position by position, aligned on the 1-based
//! round index. Runs that stopped early (bankruptcy) are left out of the
//! mean past their last round, so the averaged trajectory is as long as
//! the longest run and each row says how many runs fed it.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::{BetRecord, FrequencyRecord, Histogram, POCKET_COUNT};

/// Averaged baseline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedFrequency {
    pub round: usize,
    /// Runs that reached this round.
    pub runs: usize,
    pub outcome: f64,
    pub hits: f64,
    pub relative_frequency: f64,
    pub relative_frequency_pct: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

/// Averaged betting row. Row 1 is already settled; the opening bank is
/// `BettingConfig::initial_capital`, exported alongside the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedBet {
    pub round: usize,
    /// Runs that reached this round.
    pub runs: usize,
    pub bet: f64,
    pub capital: f64,
    /// Share of runs that won this round.
    pub win_rate: f64,
    pub win_frequency: f64,
}

/// Mean of `N` extracted columns at every index, skipping runs that are
/// too short. Returns `(round, runs, means)` per index.
fn average_by_index<T, const N: usize>(
    runs: &[Vec<T>],
    extract: impl Fn(&T) -> [f64; N],
) -> Vec<(usize, usize, [f64; N])> {
    let longest = runs.iter().map(Vec::len).max().unwrap_or(0);
    (0..longest)
        .map(|i| {
            let mut sums = [0.0; N];
            let mut present = 0usize;
            for row in runs.iter().filter_map(|run| run.get(i)) {
                for (sum, value) in sums.iter_mut().zip(extract(row)) {
                    *sum += value;
                }
                present += 1;
            }
            for sum in sums.iter_mut() {
                *sum /= present as f64;
            }
            (i + 1, present, sums)
        })
        .collect()
}

pub fn average_frequency(runs: &[Vec<FrequencyRecord>]) -> Vec<AveragedFrequency> {
    average_by_index(runs, |r| {
        [
            r.outcome as f64,
            r.hits as f64,
            r.relative_frequency,
            r.relative_frequency_pct,
            r.mean,
            r.variance,
            r.std_dev,
        ]
    })
    .into_iter()
    .map(|(round, runs, [outcome, hits, rel, pct, mean, variance, std_dev])| AveragedFrequency {
        round,
        runs,
        outcome,
        hits,
        relative_frequency: rel,
        relative_frequency_pct: pct,
        mean,
        variance,
        std_dev,
    })
    .collect()
}

pub fn average_bets(runs: &[Vec<BetRecord>]) -> Vec<AveragedBet> {
    average_by_index(runs, |r| {
        [
            r.bet.to_f64().unwrap_or(0.0),
            r.capital.to_f64().unwrap_or(0.0),
            if r.won { 1.0 } else { 0.0 },
            r.win_frequency,
        ]
    })
    .into_iter()
    .map(|(round, runs, [bet, capital, win_rate, win_frequency])| AveragedBet {
        round,
        runs,
        bet,
        capital,
        win_rate,
        win_frequency,
    })
    .collect()
}

/// Bucket-wise mean of per-run histograms.
pub fn average_histograms(histograms: &[Histogram]) -> Histogram {
    if histograms.is_empty() {
        return Histogram::empty();
    }
    let mut frequencies = vec![0.0; POCKET_COUNT];
    for h in histograms {
        for (acc, f) in frequencies.iter_mut().zip(&h.frequencies) {
            *acc += f;
        }
    }
    let n = histograms.len() as f64;
    for acc in frequencies.iter_mut() {
        *acc /= n;
    }
    Histogram { frequencies }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
