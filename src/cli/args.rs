//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

/// LUCS-DN - Discretise numeric features into class-labelled intervals
#[derive(Parser, Debug)]
#[command(name = "lucs-dn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Class column name.
    /// If not provided, will be selected interactively from available columns,
    /// or with --no-confirm, the last non-numeric column is used.
    #[arg(short, long)]
    pub class_column: Option<String>,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_discretized' suffix (e.g., data.csv -> data_discretized.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of divisions per feature.
    /// Neighbouring divisions are merged until this budget is met.
    #[arg(long, default_value = "5", value_parser = validate_max_divisions)]
    pub max_divisions: usize,

    /// Features to discretise (comma-separated).
    /// Defaults to every numeric column except the class column.
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Features to leave untouched (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Class label used when no bucket of a feature has a dominant class.
    /// Defaults to the first class value in the data.
    #[arg(long)]
    pub fallback_class: Option<String>,

    /// Write the divisions of every feature to this JSON file
    #[arg(long)]
    pub divisions_json: Option<PathBuf>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Print the division table of every feature
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Get the output path, deriving from input if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| derive_output_path(&self.input))
    }
}

fn derive_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("parquet");
    parent.join(format!("{}_discretized.{}", stem, extension))
}

/// Validator for max_divisions parameter
fn validate_max_divisions(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid count", s))?;

    if value < 1 {
        Err(format!("max_divisions must be at least 1, got {}", value))
    } else {
        Ok(value)
    }
}
