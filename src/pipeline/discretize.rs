//! Discretisation of DataFrame columns against a class column
//!
//! Bridges polars columns to [`DiscretizationSequence`]: derives each
//! feature's range and type, feeds the (value, class) rows, and writes the
//! resulting category strings back into the frame.

use std::collections::HashSet;

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::{DiscretizeError, DiscretizeResult};
use super::sequence::{ClassFallback, DiscretizationSequence, Division, FeatureRange};
use crate::utils::{create_feature_progress_bar, finish_with_success, finish_with_warning};

/// Default maximum number of divisions per feature
pub const DEFAULT_MAX_DIVISIONS: usize = 5;

/// Settings shared by all features of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscretizeConfig {
    /// Upper bound on divisions per feature (at least 1)
    pub max_divisions: usize,
    /// Label for features where no bucket has a dominant class.
    /// When unset, the first class value in order of appearance is used.
    pub fallback_class: Option<String>,
}

impl Default for DiscretizeConfig {
    fn default() -> Self {
        Self {
            max_divisions: DEFAULT_MAX_DIVISIONS,
            fallback_class: None,
        }
    }
}

impl DiscretizeConfig {
    pub fn new(max_divisions: usize) -> Self {
        Self {
            max_divisions,
            ..Default::default()
        }
    }

    pub fn with_fallback_class(mut self, class: impl Into<String>) -> Self {
        self.fallback_class = Some(class.into());
        self
    }

    pub fn validate(&self) -> DiscretizeResult<()> {
        if self.max_divisions < 1 {
            return Err(DiscretizeError::InvalidMaxDivisions(self.max_divisions));
        }
        Ok(())
    }
}

/// Class column values as text, read once per run
#[derive(Debug, Clone)]
pub struct ClassColumn {
    /// Column name
    pub name: String,
    /// Label of every row, `None` where missing
    pub labels: Vec<Option<String>>,
    /// Distinct labels in order of first appearance
    pub domain: Vec<String>,
}

impl ClassColumn {
    pub fn from_dataframe(df: &DataFrame, name: &str) -> DiscretizeResult<Self> {
        let column = df
            .column(name)
            .map_err(|_| DiscretizeError::FeatureNotFound(name.to_string()))?;
        let as_string = column.cast(&DataType::String)?;
        let labels: Vec<Option<String>> = as_string
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();

        let mut seen = HashSet::new();
        let domain = labels
            .iter()
            .flatten()
            .filter(|label| seen.insert(label.as_str()))
            .cloned()
            .collect();

        Ok(Self {
            name: name.to_string(),
            labels,
            domain,
        })
    }

    fn fallback(&self, config: &DiscretizeConfig) -> ClassFallback {
        match &config.fallback_class {
            Some(label) => ClassFallback::Label(label.clone()),
            None => ClassFallback::Domain(self.domain.clone()),
        }
    }
}

/// Discretisation result for one feature
#[derive(Debug, Clone, Serialize)]
pub struct FeatureDiscretization {
    /// Name of the discretised feature
    pub feature_name: String,
    /// Smallest observed value
    pub low: f64,
    /// Largest observed value
    pub high: f64,
    /// Whether the column has an integer type
    pub is_integer: bool,
    /// Rows that contributed to the class tallies
    pub observations: usize,
    /// Number of equal-width buckets before labelling
    pub initial_buckets: usize,
    /// Divisions after merging equally labelled neighbours
    pub formed_divisions: usize,
    /// Merge steps needed to reach the division budget
    pub merge_steps: usize,
    /// Final divisions
    pub divisions: Vec<Division>,
    #[serde(skip)]
    pub sequence: DiscretizationSequence,
}

impl FeatureDiscretization {
    /// Category label for a single value
    pub fn category(&self, value: f64) -> String {
        self.sequence.category(value)
    }
}

/// Feature that could not be discretised
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFeature {
    pub feature_name: String,
    pub reason: String,
}

/// Outcome of discretising a set of features
#[derive(Debug, Clone, Default)]
pub struct DiscretizationRun {
    /// Discretised features in column order
    pub results: Vec<FeatureDiscretization>,
    /// Features left unchanged
    pub skipped: Vec<SkippedFeature>,
}

/// Determine the value range of a feature column, ignoring nulls and NaN
pub fn feature_range(df: &DataFrame, feature: &str) -> DiscretizeResult<FeatureRange> {
    let column = df
        .column(feature)
        .map_err(|_| DiscretizeError::FeatureNotFound(feature.to_string()))?;
    if !column.dtype().is_primitive_numeric() {
        return Err(DiscretizeError::NonNumericFeature(feature.to_string()));
    }
    let is_integer = column.dtype().is_integer();

    let float_col = column.cast(&DataType::Float64)?;
    let (low, high) = float_col
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| DiscretizeError::NoObservations(feature.to_string()))?;

    Ok(FeatureRange::new(low, high, is_integer))
}

/// Guess the class column: the last column that is not numeric.
pub fn guess_class_column(schema: &Schema) -> Option<String> {
    schema
        .iter()
        .filter(|(_, dtype)| !dtype.is_primitive_numeric())
        .last()
        .map(|(name, _)| name.to_string())
}

/// Pick the numeric columns to discretise.
///
/// The class column is never selected. With an empty `include` list every
/// numeric column is a candidate; otherwise only the listed ones, each of
/// which must exist and be numeric. Columns in `exclude` are dropped from the
/// selection. The result follows the column order of `df`.
pub fn select_feature_columns(
    df: &DataFrame,
    class: &str,
    include: &[String],
    exclude: &[String],
) -> DiscretizeResult<Vec<String>> {
    for name in include {
        let column = df
            .column(name)
            .map_err(|_| DiscretizeError::FeatureNotFound(name.clone()))?;
        if !column.dtype().is_primitive_numeric() {
            return Err(DiscretizeError::NonNumericFeature(name.clone()));
        }
    }

    Ok(df
        .get_columns()
        .iter()
        .filter(|col| {
            let name = col.name().as_str();
            col.dtype().is_primitive_numeric()
                && name != class
                && (include.is_empty() || include.iter().any(|f| f == name))
                && !exclude.iter().any(|f| f == name)
        })
        .map(|col| col.name().to_string())
        .collect())
}

/// Discretise a single feature column against `class`.
pub fn discretize_feature(
    df: &DataFrame,
    feature: &str,
    class: &ClassColumn,
    config: &DiscretizeConfig,
) -> DiscretizeResult<FeatureDiscretization> {
    config.validate()?;
    let range = feature_range(df, feature)?;

    let float_col = df.column(feature)?.cast(&DataType::Float64)?;
    let values = float_col.f64()?;
    let rows = values
        .into_iter()
        .zip(class.labels.iter().map(|label| label.as_deref()));

    let mut sequence = DiscretizationSequence::new(feature, class.name.as_str());
    sequence.fill(&range, rows)?;
    let initial_buckets = sequence.len();
    let observations = sequence.buckets().iter().map(|b| b.count()).sum();

    sequence.determine_dominant_classes(&class.fallback(config))?;
    sequence.form_divisions();
    let formed_divisions = sequence.len();
    let merge_steps = sequence.reduce_to(config.max_divisions)?;

    Ok(FeatureDiscretization {
        feature_name: feature.to_string(),
        low: range.low,
        high: range.high,
        is_integer: range.is_integer,
        observations,
        initial_buckets,
        formed_divisions,
        merge_steps,
        divisions: sequence.divisions(),
        sequence,
    })
}

/// Discretise several features in parallel.
///
/// Features that fail individually (e.g. all values missing) are reported in
/// [`DiscretizationRun::skipped`]; configuration and class column problems
/// fail the whole run.
pub fn discretize_features(
    df: &DataFrame,
    class: &str,
    features: &[String],
    config: &DiscretizeConfig,
) -> DiscretizeResult<DiscretizationRun> {
    config.validate()?;
    let class_column = ClassColumn::from_dataframe(df, class)?;

    if features.is_empty() {
        return Ok(DiscretizationRun::default());
    }

    let pb = create_feature_progress_bar(features.len() as u64, "Discretising");

    let outcomes: Vec<(String, DiscretizeResult<FeatureDiscretization>)> = features
        .par_iter()
        .map(|feature| {
            let result = discretize_feature(df, feature, &class_column, config);
            pb.inc(1);
            (feature.clone(), result)
        })
        .collect();

    let mut run = DiscretizationRun::default();
    for (feature_name, outcome) in outcomes {
        match outcome {
            Ok(result) => run.results.push(result),
            Err(err) => run.skipped.push(SkippedFeature {
                feature_name,
                reason: err.to_string(),
            }),
        }
    }

    if run.skipped.is_empty() {
        finish_with_success(&pb, &format!("Discretised {} features", run.results.len()));
    } else {
        finish_with_warning(
            &pb,
            &format!(
                "Discretised {} features ({} skipped)",
                run.results.len(),
                run.skipped.len()
            ),
        );
    }

    Ok(run)
}

/// Replace each discretised feature column with its category labels.
///
/// Missing (and NaN) values stay missing in the output column.
pub fn apply_discretization(
    df: &DataFrame,
    results: &[FeatureDiscretization],
) -> DiscretizeResult<DataFrame> {
    let mut output = df.clone();
    for result in results {
        let float_col = df.column(&result.feature_name)?.cast(&DataType::Float64)?;
        let categories: Vec<Option<String>> = float_col
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()).map(|x| result.category(x)))
            .collect();
        output.with_column(Column::new(result.feature_name.as_str().into(), categories))?;
    }
    Ok(output)
}
