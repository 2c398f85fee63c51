//! Martingala: double after every loss, back to base after a win.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::trace;

use super::{settle, Step};

#[derive(Debug, Clone)]
pub struct Martingale {
    unit: Decimal,
}

impl Martingale {
    pub fn new(unit: Decimal) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> Decimal {
        self.unit
    }

    pub fn step(&self, last_bet: Decimal, won: bool, capital: Decimal) -> Step {
        let capital = settle(capital, last_bet, won);
        let next_bet = if won {
            self.unit
        } else {
            // Long losing streaks in unbounded mode would overflow.
            last_bet.checked_mul(dec!(2)).unwrap_or(Decimal::MAX)
        };
        trace!(%last_bet, won, %next_bet, %capital, "martingale step");
        Step { next_bet, capital }
    }
}
