//! Error types for the column data pipeline.

use thiserror::Error;

/// Result type for column data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while adapting, grouping, or processing
/// column data.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    /// A required field was absent from a raw record.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A raw field had the wrong type.
    #[error("field {field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    /// The side field was not one of the canonical codes 'L'/'R'/'M'.
    /// External spellings like "left" are resolved before the adapter,
    /// never inside it.
    #[error("invalid side {value:?}: side must be exactly 'L', 'R', or 'M'")]
    InvalidSide { value: String },

    /// A count field was negative.
    #[error("field {field} must be non-negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    /// Layer indices were duplicated or not contiguous from 0.
    #[error("invalid layer indices: {0}")]
    InvalidLayers(String),

    /// Flattened per-layer arrays disagreed in length.
    #[error("layer arrays must match: {synapses} synapse entries vs {neurons} neuron entries")]
    LayerArrayMismatch { synapses: usize, neurons: usize },

    /// A side spelling could not be resolved at the ingestion edge.
    #[error("unrecognized soma side spelling: {0:?}")]
    UnknownSideSpelling(String),

    /// A side code outside the canonical 'L'/'R'/'M' alphabet.
    #[error("unknown side code {0:?}: expected 'L', 'R', or 'M'")]
    UnknownSideCode(char),

    /// A metric could not be computed.
    #[error("metric computation failed: {0}")]
    Metric(#[from] eyemap_stats::StatsError),
}
