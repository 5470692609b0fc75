//! CSV and JSON artifacts for a completed run.
//!
//! The two record tables become `model.csv` and `agents.csv`, built as
//! plain strings with fixed headers and rows in capture order, so a
//! fixed seed and configuration reproduce the files byte for byte. A
//! `run.json` manifest sits next to them carrying the configuration
//! echo, the run outcome, and wall-clock timestamps.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use polder_core::config::RunConfig;
use polder_core::tick::PeriodSummary;

use crate::error::ExportError;
use crate::recorder::{HouseholdRecord, ModelRecord, Recorder};

/// Header line of `model.csv`.
pub const MODEL_HEADER: &str = concat!(
    "period,adapted_households,information_provision,subsidies,regulation,",
    "infrastructure,government_budget,water_attitude,political_situation,",
    "protest,media_activity,flooded"
);

/// Header line of `agents.csv`.
pub const AGENT_HEADER: &str = concat!(
    "period,household,x,y,exposure_estimated,exposure_actual,",
    "damage_estimated,damage_actual,attitude,political_perception,",
    "sandbags,insurance_taken,is_adapted,friends"
);

/// Metadata written to `run.json` next to the CSV tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Experiment id labelling the run.
    pub experiment_id: String,
    /// Human-readable run label.
    pub label: String,
    /// The configuration the run used.
    pub config: RunConfig,
    /// Periods executed.
    pub periods_run: u64,
    /// The last period summary, if any period completed.
    pub final_summary: Option<PeriodSummary>,
    /// When the run started (UTC).
    pub started_at: DateTime<Utc>,
    /// When the run finished (UTC).
    pub finished_at: DateTime<Utc>,
}

/// Write `model.csv`, `agents.csv`, and `run.json` into `dir`.
///
/// The directory is created if missing; existing files are overwritten.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory or a file cannot be
/// written, or [`ExportError::Serialization`] if the manifest fails to
/// serialize.
pub fn export_run(
    dir: &Path,
    recorder: &Recorder,
    manifest: &RunManifest,
) -> Result<(), ExportError> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join("model.csv"), model_csv(&recorder.model))?;
    fs::write(dir.join("agents.csv"), agents_csv(&recorder.households))?;
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(dir.join("run.json"), json)?;
    info!(
        dir = %dir.display(),
        model_rows = recorder.model.len(),
        agent_rows = recorder.households.len(),
        "Run artifacts written"
    );
    Ok(())
}

/// The model-level table as a CSV string.
pub fn model_csv(records: &[ModelRecord]) -> String {
    let mut csv = String::new();
    csv.push_str(MODEL_HEADER);
    csv.push('\n');
    for record in records {
        csv.push_str(&model_row(record));
        csv.push('\n');
    }
    csv
}

/// The household-level table as a CSV string.
pub fn agents_csv(records: &[HouseholdRecord]) -> String {
    let mut csv = String::new();
    csv.push_str(AGENT_HEADER);
    csv.push('\n');
    for record in records {
        csv.push_str(&agent_row(record));
        csv.push('\n');
    }
    csv
}

/// One `model.csv` row, without the trailing newline.
///
/// Floats print with `Display` (shortest round-trip form), so rows are
/// deterministic for identical state.
pub fn model_row(record: &ModelRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{}",
        record.period,
        record.adapted_households,
        record.information_provision,
        record.subsidies,
        record.regulation,
        record.infrastructure,
        record.government_budget,
        record.water_attitude,
        record.political_situation,
        record.protest,
        record.media_activity,
        record.flooded,
    )
}

/// One `agents.csv` row, without the trailing newline.
pub fn agent_row(record: &HouseholdRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        record.period,
        record.household,
        record.x,
        record.y,
        record.exposure_estimated,
        record.exposure_actual,
        record.damage_estimated,
        record.damage_actual,
        record.attitude,
        record.political_perception,
        record.sandbags,
        record.insurance_taken,
        record.is_adapted,
        record.friends,
    )
}
