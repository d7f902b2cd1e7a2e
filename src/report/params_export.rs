//! Fitted parameter export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::pipeline::{FittedParameters, PrepConfig, PrepStats};

/// Metadata about the preparation run
#[derive(Debug, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub tool_version: String,
    pub train_file: String,
    pub test_file: String,
    pub config: PrepConfig,
}

/// Complete parameter export: what was fitted and how it was used
#[derive(Debug, Serialize, Deserialize)]
pub struct ParamsExport {
    pub metadata: RunMetadata,
    pub parameters: FittedParameters,
    /// Indicator columns shared by both prepared sets, in order
    pub indicator_columns: Vec<String>,
    #[serde(skip_deserializing)]
    pub stats: Option<PrepStats>,
}

impl ParamsExport {
    pub fn new(
        train_file: &Path,
        test_file: &Path,
        config: &PrepConfig,
        parameters: &FittedParameters,
        stats: &PrepStats,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                train_file: train_file.display().to_string(),
                test_file: test_file.display().to_string(),
                config: config.clone(),
            },
            indicator_columns: parameters.indicator_columns(),
            parameters: parameters.clone(),
            stats: Some(stats.clone()),
        }
    }
}

/// Write the parameter export as pretty-printed JSON
pub fn export_params(export: &ParamsExport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(export)
        .context("Failed to serialize fitted parameters")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write parameters to {}", output_path.display()))?;
    Ok(())
}

/// Read fitted parameters back from an export file
pub fn load_params(path: &Path) -> Result<FittedParameters> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameters from {}", path.display()))?;
    let export: ParamsExport = serde_json::from_str(&json)
        .with_context(|| format!("Invalid parameter file: {}", path.display()))?;
    Ok(export.parameters)
}
