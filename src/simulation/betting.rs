//! Betting-strategy run loop.
//!
//! Bets on red every round, settles the stake at even money and asks the
//! progression for the next stake. A run stops when the trial count is
//! exhausted or, with a fixed bankroll, when the next stake cannot be
//! covered.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::strategy::{Progression, StrategyKind};
use crate::types::{is_red, BetRecord, CapitalMode, Pocket, RunSummary};
use crate::wheel::SpinSource;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything a betting run needs besides the wheel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BettingConfig {
    pub strategy: StrategyKind,
    pub capital_mode: CapitalMode,
    pub base_bet: Decimal,
    pub initial_capital: Decimal,
    /// Maximum number of rounds.
    pub trials: usize,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One finished run: its trajectory and headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BettingRun {
    pub records: Vec<BetRecord>,
    pub summary: RunSummary,
}

impl BettingRun {
    pub fn outcomes(&self) -> impl Iterator<Item = Pocket> + '_ {
        self.records.iter().map(|r| r.outcome)
    }
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

/// Play one run against `source`.
pub fn run_strategy<S: SpinSource>(source: &mut S, config: &BettingConfig) -> BettingRun {
    let mode = config.capital_mode;
    let mut progression = Progression::new(config.strategy, config.base_bet);
    let mut bet = progression.opening_bet();
    let mut capital = config.initial_capital;
    let mut peak = capital;
    let mut max_drawdown = Decimal::ZERO;
    let mut largest_bet = Decimal::ZERO;
    let mut wins = 0u64;
    let mut records = Vec::with_capacity(config.trials);

    let mut bankrupt = mode.is_fixed() && !can_cover(bet, capital);

    if !bankrupt {
        for round in 1..=config.trials {
            let outcome = source.spin();
            let won = is_red(outcome);
            if won {
                wins += 1;
            }
            largest_bet = largest_bet.max(bet);

            let step = progression.step(bet, won, capital);
            capital = step.capital;

            if capital > peak {
                peak = capital;
            }
            max_drawdown = max_drawdown.max(peak.checked_sub(capital).unwrap_or(Decimal::MAX));

            records.push(BetRecord {
                round,
                outcome,
                won,
                bet,
                capital,
                win_frequency: wins as f64 / round as f64,
            });

            bet = step.next_bet;
            if mode.is_fixed() && !can_cover(bet, capital) {
                bankrupt = true;
                debug!(round, %capital, next_bet = %bet, "Bankroll cannot cover next bet");
                break;
            }
        }
    }

    let rounds = records.len();
    let summary = RunSummary {
        rounds,
        wins,
        losses: rounds as u64 - wins,
        initial_capital: config.initial_capital,
        final_capital: capital,
        peak_capital: peak,
        max_drawdown,
        largest_bet,
        bankrupt,
    };

    debug!(
        strategy = %progression.kind(),
        mode = %mode,
        rounds,
        final_capital = %capital,
        bankrupt,
        "Run finished"
    );

    BettingRun { records, summary }
}

/// A stake is playable when positive and no larger than the capital.
fn can_cover(bet: Decimal, capital: Decimal) -> bool {
    bet > Decimal::ZERO && bet <= capital
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{ScriptedWheel, Wheel};
    use rust_decimal_macros::dec;

    const RED: u8 = 1;
    const BLACK: u8 = 2;

    fn config(strategy: StrategyKind, mode: CapitalMode, capital: Decimal, trials: usize) -> BettingConfig {
        BettingConfig {
            strategy,
            capital_mode: mode,
            base_bet: dec!(10),
            initial_capital: capital,
            trials,
        }
    }

    #[test]
    fn test_martingale_records_stake_and_settled_capital() {
        let mut wheel = ScriptedWheel::new(vec![BLACK, BLACK, RED]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::Martingale, CapitalMode::Fixed, dec!(1000), 3));
        let bets: Vec<_> = run.records.iter().map(|r| r.bet).collect();
        let capital: Vec<_> = run.records.iter().map(|r| r.capital).collect();
        assert_eq!(bets, vec![dec!(10), dec!(20), dec!(40)]);
        assert_eq!(capital, vec![dec!(990), dec!(970), dec!(1010)]);
        assert_eq!(run.summary.final_capital, dec!(1010));
        assert_eq!(run.summary.wins, 1);
        assert_eq!(run.summary.losses, 2);
        assert!(!run.summary.bankrupt);
        assert_eq!(run.summary.largest_bet, dec!(40));
        assert_eq!(run.summary.max_drawdown, dec!(30));
    }

    #[test]
    fn test_zero_is_a_loss() {
        let mut wheel = ScriptedWheel::new(vec![0]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::DAlembert, CapitalMode::Fixed, dec!(1000), 1));
        assert!(!run.records[0].won);
    }

    #[test]
    fn test_fixed_capital_halts_on_bankruptcy() {
        // 10+20+40 = 70 lost; 30 left cannot cover 80.
        let mut wheel = ScriptedWheel::new(vec![BLACK]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::Martingale, CapitalMode::Fixed, dec!(100), 50));
        assert_eq!(run.records.len(), 3);
        assert!(run.summary.bankrupt);
        assert_eq!(run.summary.final_capital, dec!(30));
    }

    #[test]
    fn test_unbounded_capital_never_halts() {
        let mut wheel = ScriptedWheel::new(vec![BLACK]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::Martingale, CapitalMode::Unbounded, dec!(100), 10));
        assert_eq!(run.records.len(), 10);
        assert!(!run.summary.bankrupt);
        // 10 * (2^10 - 1) lost
        assert_eq!(run.summary.final_capital, dec!(100) - dec!(10230));
    }

    #[test]
    fn test_opening_bet_larger_than_capital() {
        let mut wheel = ScriptedWheel::new(vec![RED]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::DAlembert, CapitalMode::Fixed, dec!(5), 10));
        assert!(run.records.is_empty());
        assert!(run.summary.bankrupt);
        assert_eq!(run.summary.final_capital, dec!(5));
    }

    #[test]
    fn test_trial_limit_respected() {
        let mut wheel = Wheel::seeded(9);
        for kind in StrategyKind::ALL {
            let run = run_strategy(&mut wheel, &config(kind, CapitalMode::Unbounded, dec!(10000), 100));
            assert_eq!(run.records.len(), 100, "{kind}");
            assert_eq!(run.records.last().unwrap().round, 100);
        }
    }

    #[test]
    fn test_win_frequency_is_running_ratio() {
        let mut wheel = ScriptedWheel::new(vec![RED, BLACK, RED, RED]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::InvertedMartingale, CapitalMode::Fixed, dec!(1000), 4));
        let freq: Vec<f64> = run.records.iter().map(|r| r.win_frequency).collect();
        assert_eq!(freq, vec![1.0, 0.5, 2.0 / 3.0, 0.75]);
    }

    #[test]
    fn test_inverted_capped_run_stops_when_broke() {
        // Base 10, capital 15: lose 10 → 5 left, next stake capped at 5;
        // lose 5 → 0 left, stake 0 cannot be played.
        let mut wheel = ScriptedWheel::new(vec![BLACK]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::InvertedMartingale, CapitalMode::Fixed, dec!(15), 10));
        let bets: Vec<_> = run.records.iter().map(|r| r.bet).collect();
        assert_eq!(bets, vec![dec!(10), dec!(5)]);
        assert!(run.summary.bankrupt);
        assert_eq!(run.summary.final_capital, Decimal::ZERO);
    }

    #[test]
    fn test_inverted_capped_with_unbounded_capital() {
        // Same losses as above, but the run keeps going with a zero stake.
        let mut wheel = ScriptedWheel::new(vec![BLACK]);
        let run = run_strategy(&mut wheel, &config(StrategyKind::InvertedMartingale, CapitalMode::Unbounded, dec!(15), 5));
        let bets: Vec<_> = run.records.iter().map(|r| r.bet).collect();
        assert_eq!(bets, vec![dec!(10), dec!(5), dec!(0), dec!(0), dec!(0)]);
        assert!(!run.summary.bankrupt);
        assert_eq!(run.summary.final_capital, Decimal::ZERO);
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let cfg = config(StrategyKind::Fibonacci, CapitalMode::Fixed, dec!(10000), 200);
        let a = run_strategy(&mut Wheel::seeded(5), &cfg);
        let b = run_strategy(&mut Wheel::seeded(5), &cfg);
        assert_eq!(a.records, b.records);
        assert_eq!(a.summary, b.summary);
    }
}
