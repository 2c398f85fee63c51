//! Fibonacci progression.
//!
//! Walks a Fibonacci sequence seeded with `[1, 1]`: one step forward after a
//! loss, two steps back after a win (never before the start). The stake is
//! `unit × sequence[index]`. The sequence is grown lazily and belongs to a
//! single run.

use rust_decimal::Decimal;
use tracing::trace;

use super::{settle, Step};

#[derive(Debug, Clone)]
pub struct Fibonacci {
    unit: Decimal,
    sequence: Vec<u64>,
    index: usize,
}

impl Fibonacci {
    pub fn new(unit: Decimal) -> Self {
        Self {
            unit,
            sequence: vec![1, 1],
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sequence(&self) -> &[u64] {
        &self.sequence
    }

    /// Stake at the current index.
    pub fn current_bet(&self) -> Decimal {
        self.unit
            .checked_mul(Decimal::from(self.sequence[self.index]))
            .unwrap_or(Decimal::MAX)
    }

    pub fn step(&mut self, last_bet: Decimal, won: bool, capital: Decimal) -> Step {
        let capital = settle(capital, last_bet, won);
        if won {
            self.index = self.index.saturating_sub(2);
        } else {
            self.index += 1;
            while self.index >= self.sequence.len() {
                let n = self.sequence.len();
                let next = self.sequence[n - 1].saturating_add(self.sequence[n - 2]);
                self.sequence.push(next);
            }
        }
        let next_bet = self.current_bet();
        trace!(index = self.index, %next_bet, %capital, "fibonacci step");
        Step { next_bet, capital }
    }
}
