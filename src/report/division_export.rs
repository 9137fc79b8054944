//! Division export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{FeatureDiscretization, SkippedFeature};

/// Metadata about the discretisation run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub lucs_dn_version: String,
    pub input_file: String,
    pub class_column: String,
    pub max_divisions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_class: Option<String>,
}

/// Summary statistics of the run
#[derive(Serialize)]
pub struct RunSummary {
    pub features_discretized: usize,
    pub features_skipped: usize,
    pub total_divisions: usize,
    pub avg_divisions: f64,
}

/// Complete division export with metadata
#[derive(Serialize)]
pub struct DivisionExport<'a> {
    pub metadata: RunMetadata,
    pub summary: RunSummary,
    pub features: &'a [FeatureDiscretization],
    pub skipped: &'a [SkippedFeature],
}

/// Parameters recorded in the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub class_column: &'a str,
    pub max_divisions: usize,
    pub fallback_class: Option<&'a str>,
}

/// Write the divisions of every discretised feature to a JSON file
pub fn export_divisions(
    output_path: &Path,
    params: &ExportParams,
    results: &[FeatureDiscretization],
    skipped: &[SkippedFeature],
) -> Result<()> {
    let total_divisions: usize = results.iter().map(|r| r.divisions.len()).sum();
    let avg_divisions = if results.is_empty() {
        0.0
    } else {
        total_divisions as f64 / results.len() as f64
    };

    let export = DivisionExport {
        metadata: RunMetadata {
            timestamp: Utc::now().to_rfc3339(),
            lucs_dn_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            class_column: params.class_column.to_string(),
            max_divisions: params.max_divisions,
            fallback_class: params.fallback_class.map(|s| s.to_string()),
        },
        summary: RunSummary {
            features_discretized: results.len(),
            features_skipped: skipped.len(),
            total_divisions,
            avg_divisions,
        },
        features: results,
        skipped,
    };

    let json =
        serde_json::to_string_pretty(&export).context("Failed to serialize divisions to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write divisions to {}", output_path.display()))?;

    Ok(())
}
