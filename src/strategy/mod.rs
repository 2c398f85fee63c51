//! Betting progressions: Martingala, D'Alembert, Fibonacci and
//! Inverted Martingala.
//!
//! A progression maps (last bet, win/loss, capital) to (next bet, capital).
//! The kind is picked once per run; any state it needs (the Fibonacci
//! index and sequence) lives inside the `Progression` value owned by that
//! run.

pub mod dalembert;
pub mod fibonacci;
pub mod inverted;
pub mod martingale;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::SimError;
use dalembert::DAlembert;
use fibonacci::Fibonacci;
use inverted::InvertedMartingale;
use martingale::Martingale;

// ---------------------------------------------------------------------------
// Strategy kind
// ---------------------------------------------------------------------------

/// Which progression a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    Martingale,
    DAlembert,
    Fibonacci,
    InvertedMartingale,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Martingale,
        StrategyKind::DAlembert,
        StrategyKind::Fibonacci,
        StrategyKind::InvertedMartingale,
    ];

    /// Single-letter tag accepted on the command line.
    pub fn tag(&self) -> char {
        match self {
            StrategyKind::Martingale => 'm',
            StrategyKind::DAlembert => 'd',
            StrategyKind::Fibonacci => 'f',
            StrategyKind::InvertedMartingale => 'o',
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Martingale => write!(f, "Martingala"),
            StrategyKind::DAlembert => write!(f, "D'Alembert"),
            StrategyKind::Fibonacci => write!(f, "Fibonacci"),
            StrategyKind::InvertedMartingale => write!(f, "Inverted Martingala"),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "martingala" | "martingale" => Ok(StrategyKind::Martingale),
            "d" | "dalembert" => Ok(StrategyKind::DAlembert),
            "f" | "fibonacci" => Ok(StrategyKind::Fibonacci),
            "o" | "inverted" => Ok(StrategyKind::InvertedMartingale),
            _ => Err(SimError::UnknownStrategy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

/// Result of settling one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next_bet: Decimal,
    pub capital: Decimal,
}

/// A progression together with its per-run state.
#[derive(Debug, Clone)]
pub enum Progression {
    Martingale(Martingale),
    DAlembert(DAlembert),
    Fibonacci(Fibonacci),
    InvertedMartingale(InvertedMartingale),
}

impl Progression {
    /// Fresh progression; `unit` is the base bet.
    pub fn new(kind: StrategyKind, unit: Decimal) -> Self {
        match kind {
            StrategyKind::Martingale => Progression::Martingale(Martingale::new(unit)),
            StrategyKind::DAlembert => Progression::DAlembert(DAlembert::new(unit)),
            StrategyKind::Fibonacci => Progression::Fibonacci(Fibonacci::new(unit)),
            StrategyKind::InvertedMartingale => {
                Progression::InvertedMartingale(InvertedMartingale::new(unit))
            }
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Progression::Martingale(_) => StrategyKind::Martingale,
            Progression::DAlembert(_) => StrategyKind::DAlembert,
            Progression::Fibonacci(_) => StrategyKind::Fibonacci,
            Progression::InvertedMartingale(_) => StrategyKind::InvertedMartingale,
        }
    }

    /// Stake for the first round.
    pub fn opening_bet(&self) -> Decimal {
        match self {
            Progression::Martingale(p) => p.unit(),
            Progression::DAlembert(p) => p.unit(),
            Progression::Fibonacci(p) => p.current_bet(),
            Progression::InvertedMartingale(p) => p.unit(),
        }
    }

    /// Settle `last_bet` and pick the next stake.
    pub fn step(&mut self, last_bet: Decimal, won: bool, capital: Decimal) -> Step {
        match self {
            Progression::Martingale(p) => p.step(last_bet, won, capital),
            Progression::DAlembert(p) => p.step(last_bet, won, capital),
            Progression::Fibonacci(p) => p.step(last_bet, won, capital),
            Progression::InvertedMartingale(p) => p.step(last_bet, won, capital),
        }
    }
}

/// Even-money settlement: credit the stake on a win, debit it on a loss.
/// Saturates at the representable range.
pub fn settle(capital: Decimal, bet: Decimal, won: bool) -> Decimal {
    if won {
        capital.checked_add(bet).unwrap_or(Decimal::MAX)
    } else {
        capital.checked_sub(bet).unwrap_or(Decimal::MIN)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
