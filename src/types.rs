//! Shared types for the roulette simulators.
//!
//! These types form the data model used across all modules: pockets and
//! their colours, per-round trajectory records, run summaries and the
//! domain error enum. Strategy, simulation and report modules depend on
//! them without depending on each other.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Wheel layout
// ---------------------------------------------------------------------------

/// A pocket number on a European wheel (0..=36).
pub type Pocket = u8;

/// Number of pockets on a single-zero wheel.
pub const POCKET_COUNT: usize = 37;

/// Highest pocket number.
pub const MAX_POCKET: Pocket = 36;

/// Red numbers on a roulette wheel.
pub const RED_NUMBERS: [Pocket; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Check if a number is red. Zero is neither red nor black.
pub fn is_red(pocket: Pocket) -> bool {
    RED_NUMBERS.contains(&pocket)
}

/// Pocket colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Color {
    pub fn of(pocket: Pocket) -> Self {
        if pocket == 0 {
            Color::Green
        } else if is_red(pocket) {
            Color::Red
        } else {
            Color::Black
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Green => write!(f, "green"),
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference values
// ---------------------------------------------------------------------------

/// Closed-form expectations for a fair single-zero wheel, drawn as
/// reference lines next to the simulated estimators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValues {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// Probability of any single pocket.
    pub pocket_frequency: f64,
    /// Probability of hitting red.
    pub red_frequency: f64,
}

impl ReferenceValues {
    pub fn european() -> Self {
        let n = POCKET_COUNT as f64;
        let variance = (n * n - 1.0) / 12.0;
        Self {
            mean: MAX_POCKET as f64 / 2.0,
            variance,
            std_dev: variance.sqrt(),
            pocket_frequency: 1.0 / n,
            red_frequency: RED_NUMBERS.len() as f64 / n,
        }
    }
}

// ---------------------------------------------------------------------------
// Capital mode
// ---------------------------------------------------------------------------

/// Whether the bankroll gates play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapitalMode {
    /// The run halts once the next bet cannot be covered.
    Fixed,
    /// The ledger is tracked but may go negative; it never halts a run.
    Unbounded,
}

impl CapitalMode {
    pub fn is_fixed(&self) -> bool {
        matches!(self, CapitalMode::Fixed)
    }
}

impl fmt::Display for CapitalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapitalMode::Fixed => write!(f, "fixed"),
            CapitalMode::Unbounded => write!(f, "unbounded"),
        }
    }
}

impl std::str::FromStr for CapitalMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f" | "fixed" | "finito" => Ok(CapitalMode::Fixed),
            "i" | "unbounded" | "infinito" => Ok(CapitalMode::Unbounded),
            _ => Err(SimError::UnknownCapitalMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Trajectory records
// ---------------------------------------------------------------------------

/// Running estimators after one spin of a baseline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRecord {
    /// 1-based trial index.
    pub round: usize,
    pub outcome: Pocket,
    /// Cumulative hits of the target pocket.
    pub hits: u64,
    pub relative_frequency: f64,
    pub relative_frequency_pct: f64,
    /// Mean of the outcomes seen so far.
    pub mean: f64,
    /// Population variance of the outcomes seen so far.
    pub variance: f64,
    pub std_dev: f64,
}

/// One settled round of a betting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    /// 1-based round index.
    pub round: usize,
    pub outcome: Pocket,
    pub won: bool,
    /// Stake wagered this round.
    pub bet: Decimal,
    /// Ledger after settling this round.
    pub capital: Decimal,
    /// Wins so far divided by rounds so far.
    pub win_frequency: f64,
}

/// Relative frequency of each pocket within one run (or averaged).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub frequencies: Vec<f64>,
}

impl Histogram {
    pub fn empty() -> Self {
        Self {
            frequencies: vec![0.0; POCKET_COUNT],
        }
    }

    /// Build from a sequence of outcomes.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Pocket>,
    {
        let mut counts = [0u64; POCKET_COUNT];
        let mut total = 0u64;
        for pocket in outcomes {
            counts[pocket as usize] += 1;
            total += 1;
        }
        if total == 0 {
            return Self::empty();
        }
        Self {
            frequencies: counts.iter().map(|&c| c as f64 / total as f64).collect(),
        }
    }

    pub fn frequency(&self, pocket: Pocket) -> f64 {
        self.frequencies.get(pocket as usize).copied().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Outcome of a single betting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rounds: usize,
    pub wins: u64,
    pub losses: u64,
    pub initial_capital: Decimal,
    pub final_capital: Decimal,
    pub peak_capital: Decimal,
    /// Largest peak-to-trough fall of the ledger.
    pub max_drawdown: Decimal,
    pub largest_bet: Decimal,
    /// The bankroll could not cover the next bet.
    pub bankrupt: bool,
}

impl RunSummary {
    /// Win rate as a fraction. Returns 0.0 if no rounds were played.
    pub fn win_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.wins as f64 / self.rounds as f64
        }
    }

    /// Final minus initial capital, saturating at `Decimal::MIN`.
    pub fn net(&self) -> Decimal {
        self.final_capital
            .checked_sub(self.initial_capital)
            .unwrap_or(Decimal::MIN)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rounds={} (W{}/L{}) | win_rate={:.1}% | final={:.2} | net={:.2} | peak={:.2} | max_dd={:.2} | max_bet={:.2}{}",
            self.rounds,
            self.wins,
            self.losses,
            self.win_rate() * 100.0,
            self.final_capital,
            self.net(),
            self.peak_capital,
            self.max_drawdown,
            self.largest_bet,
            if self.bankrupt { " | BANKRUPT" } else { "" },
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Wrong number of arguments or wrong order")]
    MalformedInvocation,

    #[error("Invalid value for {flag}: {message}")]
    InvalidValue { flag: String, message: String },

    #[error("Unknown strategy: {0} (expected m, d, f or o)")]
    UnknownStrategy(String),

    #[error("Unknown capital mode: {0} (expected f or i)")]
    UnknownCapitalMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
