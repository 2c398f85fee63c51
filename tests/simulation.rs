//! End-to-end simulation tests through the public library API.

use roulette_sim::simulation::betting::{run_strategy, BettingConfig};
use roulette_sim::simulation::{betting_run_set, frequency_run_set};
use roulette_sim::strategy::StrategyKind;
use roulette_sim::types::{CapitalMode, ReferenceValues};
use roulette_sim::wheel::{ScriptedWheel, Wheel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SEED: u64 = 20_240_517;

fn martingale_fixed(trials: usize) -> BettingConfig {
    BettingConfig {
        strategy: StrategyKind::Martingale,
        capital_mode: CapitalMode::Fixed,
        base_bet: dec!(10),
        initial_capital: dec!(10000),
        trials,
    }
}

#[test]
fn test_martingale_hundred_rounds_is_reproducible() {
    let cfg = martingale_fixed(100);
    let first = betting_run_set(SEED, 1, &cfg, false);
    let second = betting_run_set(SEED, 1, &cfg, false);

    let run = &first.runs[0];
    assert_eq!(run.summary.rounds, run.records.len());

    // Fixture for this seed: the bank survives all 100 rounds.
    let opening: Vec<u8> = run.records.iter().take(5).map(|r| r.outcome).collect();
    assert_eq!(opening, vec![16, 3, 8, 13, 0]);
    assert_eq!(run.records.len(), 100);
    assert!(!run.summary.bankrupt);
    assert_eq!(run.summary.wins, 47);
    assert_eq!(run.summary.largest_bet, dec!(320));
    assert_eq!(run.summary.final_capital, dec!(10320));
    assert_eq!(run.summary.final_capital, second.runs[0].summary.final_capital);
    assert_eq!(run.records, second.runs[0].records);

    // The final bank is the opening bank plus every settled stake.
    let settled = run.records.iter().fold(dec!(10000), |capital, r| {
        if r.won {
            capital + r.bet
        } else {
            capital - r.bet
        }
    });
    assert_eq!(settled, run.summary.final_capital);
    if let Some(last) = run.records.last() {
        assert_eq!(last.capital, run.summary.final_capital);
    }
}

#[test]
fn test_martingale_losing_streak_bankrupts_fixed_bank() {
    let mut wheel = ScriptedWheel::new(vec![2]);
    let run = run_strategy(&mut wheel, &martingale_fixed(100));

    // 10 + 20 + ... + 2560 = 5110 lost, and 5120 no longer fits in 4890.
    assert!(run.summary.bankrupt);
    assert_eq!(run.records.len(), 9);
    assert_eq!(run.summary.final_capital, dec!(4890));
    assert_eq!(run.summary.largest_bet, dec!(2560));
}

#[test]
fn test_unbounded_bank_never_stops_early() {
    let mut wheel = ScriptedWheel::new(vec![0]);
    let cfg = BettingConfig {
        capital_mode: CapitalMode::Unbounded,
        ..martingale_fixed(40)
    };
    let run = run_strategy(&mut wheel, &cfg);
    assert_eq!(run.records.len(), 40);
    assert!(!run.summary.bankrupt);
    assert!(run.summary.final_capital < Decimal::ZERO);
}

#[test]
fn test_fibonacci_stakes_follow_sequence_on_losses() {
    let mut wheel = ScriptedWheel::new(vec![0]);
    let cfg = BettingConfig {
        strategy: StrategyKind::Fibonacci,
        capital_mode: CapitalMode::Unbounded,
        base_bet: dec!(5),
        initial_capital: dec!(1000),
        trials: 8,
    };
    let run = run_strategy(&mut wheel, &cfg);
    let stakes: Vec<Decimal> = run.records.iter().map(|r| r.bet).collect();
    assert_eq!(
        stakes,
        vec![dec!(5), dec!(5), dec!(10), dec!(15), dec!(25), dec!(40), dec!(65), dec!(105)]
    );
}

#[test]
fn test_every_strategy_runs_in_both_modes() {
    for strategy in StrategyKind::ALL {
        for mode in [CapitalMode::Fixed, CapitalMode::Unbounded] {
            let cfg = BettingConfig {
                strategy,
                capital_mode: mode,
                base_bet: dec!(5),
                initial_capital: dec!(10000),
                trials: 250,
            };
            let set = betting_run_set(SEED, 6, &cfg, true);
            assert_eq!(set.runs.len(), 6, "{strategy} {mode}");
            assert!(set.averaged.len() <= 250);
            if mode == CapitalMode::Unbounded {
                assert_eq!(set.bankrupt_count(), 0);
                assert_eq!(set.averaged.len(), 250);
            }
        }
    }
}

#[test]
fn test_averaged_bets_only_count_live_runs() {
    let set = betting_run_set(SEED, 20, &martingale_fixed(1000), false);
    let longest = set.runs.iter().map(|r| r.records.len()).max().unwrap_or(0);
    assert_eq!(set.averaged.len(), longest);

    for row in &set.averaged {
        let live = set.runs.iter().filter(|r| r.records.len() >= row.round).count();
        assert_eq!(row.runs, live, "round {}", row.round);
    }
}

#[test]
fn test_baseline_estimators_converge() {
    let reference = ReferenceValues::european();
    let set = frequency_run_set(SEED, 100, 1000, 17, true);
    let last = set.averaged.last().unwrap();

    assert_eq!(set.averaged.len(), 1000);
    assert_eq!(last.runs, 100);
    assert!((last.mean - reference.mean).abs() < 0.5, "mean {}", last.mean);
    assert!((last.variance - reference.variance).abs() < 4.0, "variance {}", last.variance);
    assert!(
        (last.relative_frequency - reference.pocket_frequency).abs() < 0.006,
        "frequency {}",
        last.relative_frequency
    );

    let total: f64 = set.averaged_histogram.frequencies.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_run_wheels_are_independent() {
    let mut a = Wheel::for_run(SEED, 0);
    let mut b = Wheel::for_run(SEED, 1);
    assert_ne!(a.seed(), b.seed());

    use roulette_sim::wheel::SpinSource;
    assert_ne!(a.spins(50), b.spins(50));
}
