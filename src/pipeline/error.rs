//! Error types for feature discretisation.
//!
//! The discretisation engine itself has almost no failure surface: zero
//! variance features, missing values and ambiguous buckets are all handled as
//! regular cases. What remains is malformed configuration and range metadata
//! that disagrees with the rows it describes.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while building a discretisation.
#[derive(Debug, Error)]
pub enum DiscretizeError {
    /// The division budget must allow at least one division.
    #[error("Maximum number of divisions must be at least 1, got {0}")]
    InvalidMaxDivisions(usize),

    /// The declared feature range is not usable for binning.
    ///
    /// Both bounds must be finite and `low` must not exceed `high`.
    #[error("Invalid range for feature '{feature}': [{low}, {high}]")]
    InvalidRange {
        /// Feature the range was declared for
        feature: String,
        /// Declared minimum
        low: f64,
        /// Declared maximum
        high: f64,
    },

    /// A value fell beyond the last bucket.
    ///
    /// Only possible when the declared maximum is smaller than an observed
    /// value, i.e. the range metadata does not describe the rows.
    #[error("Value {value} of feature '{feature}' lies outside its declared range")]
    ValueOutOfRange {
        /// Feature being binned
        feature: String,
        /// Offending value
        value: f64,
    },

    /// No bucket obtained a dominant class and there is no fallback label.
    #[error("Class column '{0}' has no known values to fall back on")]
    EmptyClassDomain(String),

    /// A requested column does not exist in the dataset.
    #[error("Column '{0}' not found in dataset")]
    FeatureNotFound(String),

    /// A requested feature column is not numeric.
    #[error("Column '{0}' is not numeric and cannot be discretised")]
    NonNumericFeature(String),

    /// A feature has no non-missing values, so its range is undefined.
    #[error("Feature '{0}' has no non-missing values")]
    NoObservations(String),

    /// Error raised by the dataframe layer.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Convenience alias used throughout the discretisation pipeline.
pub type DiscretizeResult<T> = std::result::Result<T, DiscretizeError>;
