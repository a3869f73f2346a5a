//! Eyemap Metric Statistics
//!
//! The numeric layer of the eyemap pipeline: metric formulas, the
//! percentile boundaries that color scales and cell-count filter buckets
//! are built from, and the per-region min/max context shared by every
//! render of one neuron type.
//!
//! Percentile boundaries rather than plain min/max keep the color scale
//! robust: a handful of extreme outlier columns compress into the top
//! bucket instead of washing out the rest of the ramp.
//!
//! This layer is intentionally strict about its inputs (a NaN in a
//! metric sample is a typed error), while the downstream color layer is
//! lenient (a missing value becomes the no-data color).

mod metrics;
mod minmax;
mod thresholds;

pub use metrics::{metric_value, MetricType};
pub use minmax::{MinMaxBuilder, MinMaxData, MinMaxEntry};
pub use thresholds::{bucket_ranges, calculate_thresholds, percentile, ValueRange};

use thiserror::Error;

/// Result type for statistics operations.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors from metric and threshold computation.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// A metric input was NaN or infinite.
    #[error("non-numeric {label} value: {value}")]
    NonNumeric { label: &'static str, value: f64 },

    /// A metric input was negative (counts are non-negative by contract).
    #[error("negative {label} value: {value}")]
    Negative { label: &'static str, value: f64 },

    /// Threshold computation needs at least one sample value.
    #[error("empty metric sample")]
    EmptySample,

    /// Threshold computation needs at least one bucket.
    #[error("num_thresholds must be at least 1")]
    NoBuckets,
}
