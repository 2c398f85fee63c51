//! Inverted Martingala (Paroli-style): press one unit after a win, back to
//! base after a loss. The stake never exceeds the capital on hand.

use rust_decimal::Decimal;

use super::{settle, Step};

#[derive(Debug, Clone)]
pub struct InvertedMartingale {
    unit: Decimal,
}

impl InvertedMartingale {
    pub fn new(unit: Decimal) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> Decimal {
        self.unit
    }

    /// With an unbounded bankroll the cap can drop the stake to zero or
    /// below; only a fixed bankroll halts the run on that.
    pub fn step(&self, last_bet: Decimal, won: bool, capital: Decimal) -> Step {
        let capital = settle(capital, last_bet, won);
        let raised = if won { last_bet + self.unit } else { self.unit };
        let next_bet = raised.min(capital);
        Step { next_bet, capital }
    }
}
