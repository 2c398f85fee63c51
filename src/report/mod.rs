//! Console reporting.
//!
//! Prints run-set summaries next to the closed-form reference values.
//! Writers are generic so the same text can go to stdout or a buffer.

pub mod export;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::io::{self, Write};

use crate::simulation::betting::BettingRun;
use crate::simulation::{BettingRunSet, FrequencyRunSet};
use crate::types::{CapitalMode, Color, Histogram, Pocket, ReferenceValues, POCKET_COUNT};

/// Averaged final estimators against their expectations.
pub fn write_frequency_summary<W: Write>(
    out: &mut W,
    set: &FrequencyRunSet,
    seed: u64,
    show_runs: bool,
) -> io::Result<()> {
    let reference = ReferenceValues::european();
    let trials = set.averaged.len();

    writeln!(
        out,
        "Baseline: pocket {} | {} runs x {} spins | seed {}",
        set.target,
        set.runs.len(),
        trials,
        seed
    )?;

    if show_runs {
        for (i, run) in set.runs.iter().enumerate() {
            if let Some(last) = run.last() {
                writeln!(
                    out,
                    "  run {:>3}: hits={} fr={:.5} mean={:.4} var={:.4} std={:.4}",
                    i + 1,
                    last.hits,
                    last.relative_frequency,
                    last.mean,
                    last.variance,
                    last.std_dev
                )?;
            }
        }
    }

    let Some(last) = set.averaged.last() else {
        return writeln!(out, "  (no spins)");
    };

    writeln!(out, "  {:<22}{:>12}{:>12}", "estimator", "averaged", "expected")?;
    let rows = [
        ("mean", last.mean, reference.mean),
        ("variance", last.variance, reference.variance),
        ("std dev", last.std_dev, reference.std_dev),
        ("relative frequency", last.relative_frequency, reference.pocket_frequency),
        ("relative frequency %", last.relative_frequency_pct, reference.pocket_frequency * 100.0),
    ];
    for (name, simulated, expected) in rows {
        writeln!(out, "  {:<22}{:>12.4}{:>12.4}", name, simulated, expected)?;
    }
    Ok(())
}

/// Bankruptcies and final capital across a betting run set.
pub fn write_betting_summary<W: Write>(
    out: &mut W,
    set: &BettingRunSet,
    seed: u64,
    show_runs: bool,
) -> io::Result<()> {
    let reference = ReferenceValues::european();
    let cfg = &set.config;

    writeln!(
        out,
        "Strategy: {} | capital: {} | base bet {} | initial {} | {} runs x {} rounds | seed {}",
        cfg.strategy,
        cfg.capital_mode,
        cfg.base_bet,
        cfg.initial_capital,
        set.runs.len(),
        cfg.trials,
        seed
    )?;

    if show_runs {
        for (i, run) in set.runs.iter().enumerate() {
            writeln!(out, "  run {:>3}: {}", i + 1, run.summary)?;
        }
    }

    if set.runs.is_empty() {
        return writeln!(out, "  (no runs)");
    }

    let n = set.runs.len() as f64;
    let finals: Vec<f64> = set.runs.iter().map(|r| to_f64(r.summary.final_capital)).collect();
    let mean_final = finals.iter().sum::<f64>() / n;
    let best = finals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let worst = finals.iter().cloned().fold(f64::INFINITY, f64::min);
    let mean_rounds = set.runs.iter().map(|r| r.summary.rounds as f64).sum::<f64>() / n;
    let mean_win_rate = set.runs.iter().map(|r| r.summary.win_rate()).sum::<f64>() / n;

    if cfg.capital_mode == CapitalMode::Fixed {
        writeln!(out, "  bankrupt runs:       {}/{}", set.bankrupt_count(), set.runs.len())?;
    }
    writeln!(out, "  mean final capital:  {:.2}", mean_final)?;
    writeln!(out, "  best / worst:        {:.2} / {:.2}", best, worst)?;
    writeln!(out, "  mean rounds played:  {:.1}", mean_rounds)?;
    writeln!(
        out,
        "  mean win frequency:  {:.4} (expected {:.4})",
        mean_win_rate, reference.red_frequency
    )?;
    Ok(())
}

/// End-of-game text for the standalone Martingala run.
pub fn write_martingale_summary<W: Write>(
    out: &mut W,
    run: &BettingRun,
    mode: CapitalMode,
    max_rounds: usize,
) -> io::Result<()> {
    let s = &run.summary;
    if s.bankrupt {
        writeln!(out, "The bank cannot cover the next bet.")?;
    } else if s.rounds >= max_rounds {
        writeln!(out, "Reached the maximum of {max_rounds} rounds.")?;
    }

    match mode {
        CapitalMode::Fixed => writeln!(out, "\nGame over. Final bank: {}", s.final_capital)?,
        CapitalMode::Unbounded => writeln!(out, "\nGame over. Final bank: unbounded (ledger {})", s.final_capital)?,
    }
    writeln!(out, "Hits: {}, Misses: {}", s.wins, s.losses)?;
    writeln!(out, "Largest bet: {}", s.largest_bet)?;
    if let Some(last) = run.records.last() {
        writeln!(out, "Cumulative hit rate: {:.4}", last.win_frequency)?;
    }
    Ok(())
}

/// Bankroll after roughly `points` evenly spaced rounds, always ending on
/// the last round played.
pub fn write_bankroll_history<W: Write>(out: &mut W, run: &BettingRun, points: usize) -> io::Result<()> {
    writeln!(out, "Bankroll history:")?;
    let len = run.records.len();
    if len == 0 {
        return writeln!(out, "  (no rounds played)");
    }
    let stride = (len / points.max(1)).max(1);
    for record in run.records.iter().skip(stride - 1).step_by(stride) {
        writeln!(out, "  round {:>6}: bet {:>10} bank {}", record.round, record.bet, record.capital)?;
    }
    if len % stride != 0 {
        if let Some(last) = run.records.last() {
            writeln!(out, "  round {:>6}: bet {:>10} bank {}", last.round, last.bet, last.capital)?;
        }
    }
    Ok(())
}

/// Relative frequency of every pocket, ten per line.
pub fn write_histogram<W: Write>(out: &mut W, title: &str, histogram: &Histogram) -> io::Result<()> {
    writeln!(out, "{title} (expected {:.4} each)", ReferenceValues::european().pocket_frequency)?;
    for start in (0..POCKET_COUNT).step_by(10) {
        let end = (start + 10).min(POCKET_COUNT);
        let line: Vec<String> = (start..end)
            .map(|p| format!("{:>2}:{:.4}", p, histogram.frequencies.get(p).copied().unwrap_or(0.0)))
            .collect();
        writeln!(out, "  {}", line.join("  "))?;
    }

    let colors: Vec<String> = [Color::Green, Color::Red, Color::Black]
        .into_iter()
        .map(|color| {
            let share: f64 = (0..POCKET_COUNT as Pocket)
                .filter(|&p| Color::of(p) == color)
                .map(|p| histogram.frequency(p))
                .sum();
            format!("{color} {share:.4}")
        })
        .collect();
    writeln!(out, "  {}", colors.join(" | "))?;
    Ok(())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
