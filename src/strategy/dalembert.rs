//! D'Alembert: one unit up after a loss, one unit down after a win, never
//! below one unit.

use rust_decimal::Decimal;

use super::{settle, Step};

#[derive(Debug, Clone)]
pub struct DAlembert {
    unit: Decimal,
}

impl DAlembert {
    pub fn new(unit: Decimal) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> Decimal {
        self.unit
    }

    pub fn step(&self, last_bet: Decimal, won: bool, capital: Decimal) -> Step {
        let capital = settle(capital, last_bet, won);
        let next_bet = if won {
            (last_bet - self.unit).max(self.unit)
        } else {
            last_bet + self.unit
        };
        Step { next_bet, capital }
    }
}
