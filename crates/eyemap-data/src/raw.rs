//! Loosely-typed raw records from the database query layer.
//!
//! A raw record is a map of named fields with JSON-ish values. Typed
//! extraction happens field by field, each failure naming the field,
//! so the adapter can report exactly what a malformed row is missing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DataError, Result};

/// Field names of the per-column summary records produced by the
/// database query collaborator.
pub mod fields {
    /// First native hex axis.
    pub const HEX1: &str = "hex1";
    /// Second native hex axis.
    pub const HEX2: &str = "hex2";
    /// Neuropil region tag (e.g. ME/LO/LOP).
    pub const REGION: &str = "region";
    /// Soma side spelling.
    pub const SIDE: &str = "side";
    /// Total synapse count for the column.
    pub const TOTAL_SYNAPSES: &str = "total_synapses";
    /// Innervating neuron count for the column.
    pub const NEURON_COUNT: &str = "neuron_count";
    /// Structured layer list: objects with `layer_index`,
    /// `synapse_count`, `neuron_count`.
    pub const LAYERS: &str = "layers";
    /// Flattened per-layer synapse counts (index = layer).
    pub const LAYER_SYNAPSES: &str = "layer_synapses";
    /// Flattened per-layer neuron counts (index = layer).
    pub const LAYER_NEURONS: &str = "layer_neurons";
}

/// One raw per-column summary record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawColumnRecord(Map<String, Value>);

impl RawColumnRecord {
    /// Wrap a JSON object as a raw record. Non-object values are a
    /// type error at the boundary.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(DataError::InvalidType {
                field: "record",
                expected: "an object of named fields",
            }),
        }
    }

    /// Whether a field is present.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// A required integer field.
    pub fn require_i64(&self, field: &'static str) -> Result<i64> {
        let value = self.0.get(field).ok_or(DataError::MissingField(field))?;
        value.as_i64().ok_or(DataError::InvalidType {
            field,
            expected: "an integer",
        })
    }

    /// A required non-negative count field.
    pub fn require_count(&self, field: &'static str) -> Result<u64> {
        let value = self.require_i64(field)?;
        u64::try_from(value).map_err(|_| DataError::NegativeCount { field, value })
    }

    /// A required string field.
    pub fn require_str(&self, field: &'static str) -> Result<&str> {
        let value = self.0.get(field).ok_or(DataError::MissingField(field))?;
        value.as_str().ok_or(DataError::InvalidType {
            field,
            expected: "a string",
        })
    }

    /// An optional array field.
    pub fn get_array(&self, field: &'static str) -> Result<Option<&Vec<Value>>> {
        match self.0.get(field) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(DataError::InvalidType {
                field,
                expected: "an array",
            }),
        }
    }
}

impl TryFrom<Value> for RawColumnRecord {
    type Error = DataError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}
