//! Configuration loading from TOML.
//!
//! Reads `roulette.toml` (or the file named by `ROULETTE_CONFIG`) and
//! deserializes it into strongly-typed structs. Every key is optional; a
//! missing file means all defaults.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::types::SimError;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "roulette.toml";

/// Env var overriding the config file path.
pub const CONFIG_ENV: &str = "ROULETTE_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Master seed. Drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Generate runs on the rayon pool.
    pub parallel: bool,
    pub strategy: StrategySettings,
    pub martingale: MartingaleSettings,
    pub report: ReportSettings,
}

/// Settings for the `strategy` binary.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StrategySettings {
    pub base_bet: Decimal,
    pub initial_capital: Decimal,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            base_bet: dec!(5),
            initial_capital: dec!(10000),
        }
    }
}

/// Settings for the standalone `martingale` binary.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MartingaleSettings {
    pub base_bet: Decimal,
    pub initial_capital: Decimal,
    pub max_rounds: usize,
}

impl Default for MartingaleSettings {
    fn default() -> Self {
        Self {
            base_bet: dec!(10),
            initial_capital: dec!(10000),
            max_rounds: 10_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ReportSettings {
    /// Write a JSON export of every run here.
    pub export_path: Option<String>,
    /// Print one summary line per run, not just the aggregate.
    pub show_runs: bool,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            let config = Self::load(path)?;
            info!(path, "Loaded configuration");
            Ok(config)
        } else {
            debug!(path, "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the config path from `ROULETTE_CONFIG` or the default name.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_or_default(&path)
    }

    /// Reject settings no simulation can run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.strategy.base_bet <= Decimal::ZERO {
            return Err(SimError::Config("strategy.base_bet must be positive".into()));
        }
        if self.strategy.initial_capital <= Decimal::ZERO {
            return Err(SimError::Config("strategy.initial_capital must be positive".into()));
        }
        if self.martingale.base_bet <= Decimal::ZERO {
            return Err(SimError::Config("martingale.base_bet must be positive".into()));
        }
        if self.martingale.initial_capital <= Decimal::ZERO {
            return Err(SimError::Config("martingale.initial_capital must be positive".into()));
        }
        if self.martingale.max_rounds == 0 {
            return Err(SimError::Config("martingale.max_rounds must be at least 1".into()));
        }
        Ok(())
    }
}
