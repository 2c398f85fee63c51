//! JSON export of a finished run set.
//!
//! Charting is done outside this crate; the export carries every
//! trajectory, the averaged trajectory, histograms and the reference
//! constants a chart needs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::simulation::aggregate::{AveragedBet, AveragedFrequency};
use crate::simulation::betting::{BettingConfig, BettingRun};
use crate::simulation::{BettingRunSet, FrequencyRunSet};
use crate::types::{FrequencyRecord, Histogram, Pocket, ReferenceValues, SimError};

/// Everything one invocation produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationExport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub reference: ReferenceValues,
    pub payload: ExportPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExportPayload {
    Frequency {
        target: Pocket,
        runs: Vec<Vec<FrequencyRecord>>,
        averaged: Vec<AveragedFrequency>,
        histograms: Vec<Histogram>,
        averaged_histogram: Histogram,
    },
    Betting {
        config: BettingConfig,
        runs: Vec<BettingRun>,
        averaged: Vec<AveragedBet>,
        averaged_histogram: Histogram,
    },
}

impl SimulationExport {
    fn new(seed: u64, payload: ExportPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            seed,
            reference: ReferenceValues::european(),
            payload,
        }
    }

    pub fn frequency(seed: u64, set: &FrequencyRunSet) -> Self {
        Self::new(
            seed,
            ExportPayload::Frequency {
                target: set.target,
                runs: set.runs.clone(),
                averaged: set.averaged.clone(),
                histograms: set.histograms.clone(),
                averaged_histogram: set.averaged_histogram.clone(),
            },
        )
    }

    pub fn betting(seed: u64, set: &BettingRunSet) -> Self {
        Self::new(
            seed,
            ExportPayload::Betting {
                config: set.config.clone(),
                runs: set.runs.clone(),
                averaged: set.averaged.clone(),
                averaged_histogram: set.averaged_histogram.clone(),
            },
        )
    }
}

/// Write an export as pretty JSON.
pub fn save_export(export: &SimulationExport, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(SimError::Export("export path is empty".into()).into());
    }

    let json = serde_json::to_string_pretty(export)
        .context("Failed to serialise simulation export")?;

    std::fs::write(path, &json)
        .context(format!("Failed to write export to {path}"))?;

    info!(path, id = %export.id, bytes = json.len(), "Export written");
    Ok(())
}

/// Read an export back.
pub fn load_export(path: &str) -> Result<SimulationExport> {
    if !Path::new(path).exists() {
        return Err(SimError::Export(format!("no export at {path}")).into());
    }

    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read export from {path}"))?;

    let export: SimulationExport = serde_json::from_str(&json)
        .context(format!("Failed to parse export from {path}"))?;

    debug!(path, id = %export.id, "Export loaded");
    Ok(export)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
