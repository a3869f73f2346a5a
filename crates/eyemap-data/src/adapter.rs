//! The adapter boundary: one raw record in, one canonical column out.
//!
//! This is the single place loosely-typed records become [`ColumnData`].
//! The side field must already be the canonical internal alphabet:
//! `"left"` is a valid *external* spelling, but resolving spellings is
//! the grouping layer's job ([`crate::ColumnDataManager::organize_by_side`]);
//! by the time a record reaches the adapter only `"L"`/`"R"`/`"M"` are
//! acceptable. Pure function: no side effects, no shared state.

use eyemap_geometry::ColumnCoordinate;

use crate::raw::{fields, RawColumnRecord};
use crate::{ColumnData, DataError, LayerData, Result, SomaSide};

/// Convert one raw record into a canonical column.
///
/// Fails when required fields are missing, the side is not exactly one
/// of the canonical codes, counts are negative, or layer indices are
/// duplicated or non-contiguous.
pub fn adapt(record: &RawColumnRecord) -> Result<ColumnData> {
    let hex1 = record.require_i64(fields::HEX1)?;
    let hex2 = record.require_i64(fields::HEX2)?;
    let region = record.require_str(fields::REGION)?.to_string();
    let side = canonical_side(record.require_str(fields::SIDE)?)?;
    let total_synapses = record.require_count(fields::TOTAL_SYNAPSES)?;
    let neuron_count = record.require_count(fields::NEURON_COUNT)?;
    let layers = extract_layers(record)?;

    ColumnData::new(
        ColumnCoordinate::new(hex1, hex2),
        region,
        side,
        total_synapses,
        neuron_count,
        layers,
    )
}

/// The adapter accepts exactly the canonical alphabet, case-sensitive.
fn canonical_side(value: &str) -> Result<SomaSide> {
    match value {
        "L" => Ok(SomaSide::Left),
        "R" => Ok(SomaSide::Right),
        "M" => Ok(SomaSide::Middle),
        other => Err(DataError::InvalidSide {
            value: other.to_string(),
        }),
    }
}

/// Layers arrive either as a structured list or as two flattened
/// per-layer arrays. Structured input wins when both are present.
fn extract_layers(record: &RawColumnRecord) -> Result<Vec<LayerData>> {
    if let Some(items) = record.get_array(fields::LAYERS)? {
        let mut layers = Vec::with_capacity(items.len());
        for item in items {
            let layer = RawColumnRecord::from_value(item.clone()).map_err(|_| {
                DataError::InvalidType {
                    field: fields::LAYERS,
                    expected: "an array of layer objects",
                }
            })?;
            let index = layer.require_i64("layer_index")?;
            let index = usize::try_from(index).map_err(|_| DataError::InvalidLayers(
                format!("layer_index must be non-negative, got {index}"),
            ))?;
            layers.push(LayerData::new(
                index,
                layer.require_count("synapse_count")?,
                layer.require_count("neuron_count")?,
            ));
        }
        return Ok(layers);
    }

    let synapses = record.get_array(fields::LAYER_SYNAPSES)?;
    let neurons = record.get_array(fields::LAYER_NEURONS)?;
    match (synapses, neurons) {
        (None, None) => Ok(Vec::new()),
        (Some(s), Some(n)) => {
            if s.len() != n.len() {
                return Err(DataError::LayerArrayMismatch {
                    synapses: s.len(),
                    neurons: n.len(),
                });
            }
            s.iter()
                .zip(n)
                .enumerate()
                .map(|(i, (syn, neu))| {
                    Ok(LayerData::new(
                        i,
                        count_from(syn, fields::LAYER_SYNAPSES)?,
                        count_from(neu, fields::LAYER_NEURONS)?,
                    ))
                })
                .collect()
        }
        (Some(s), None) => Err(DataError::LayerArrayMismatch {
            synapses: s.len(),
            neurons: 0,
        }),
        (None, Some(n)) => Err(DataError::LayerArrayMismatch {
            synapses: 0,
            neurons: n.len(),
        }),
    }
}

fn count_from(value: &serde_json::Value, field: &'static str) -> Result<u64> {
    let v = value.as_i64().ok_or(DataError::InvalidType {
        field,
        expected: "an array of integers",
    })?;
    u64::try_from(v).map_err(|_| DataError::NegativeCount { field, value: v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> RawColumnRecord {
        RawColumnRecord::from_value(json!({
            "hex1": 17,
            "hex2": 5,
            "region": "ME",
            "side": "L",
            "total_synapses": 42,
            "neuron_count": 3,
        }))
        .unwrap()
    }

    fn with_field(mut value: serde_json::Value, field: &str, v: serde_json::Value) -> RawColumnRecord {
        value[field] = v;
        RawColumnRecord::from_value(value).unwrap()
    }

    fn valid_json() -> serde_json::Value {
        json!({
            "hex1": 17,
            "hex2": 5,
            "region": "ME",
            "side": "L",
            "total_synapses": 42,
            "neuron_count": 3,
        })
    }

    #[test]
    fn adapts_a_valid_record() {
        let col = adapt(&valid_record()).unwrap();
        assert_eq!(col.coordinate(), ColumnCoordinate::new(17, 5));
        assert_eq!(col.region(), "ME");
        assert_eq!(col.side(), SomaSide::Left);
        assert_eq!(col.side_code(), 'L');
        assert_eq!(col.total_synapses(), 42);
        assert_eq!(col.neuron_count(), 3);
        assert!(col.layers().is_empty());
    }

    #[test]
    fn rejects_external_spelling_with_side_in_message() {
        // "left" is a valid external spelling but not the canonical
        // internal alphabet; the adapter must refuse it.
        let record = with_field(valid_json(), "side", json!("left"));
        let err = adapt(&record).unwrap_err();
        assert!(matches!(err, DataError::InvalidSide { .. }));
        assert!(err.to_string().contains("side"));
    }

    #[test]
    fn rejects_missing_fields() {
        for field in ["hex1", "hex2", "region", "side", "total_synapses", "neuron_count"] {
            let mut value = valid_json();
            value.as_object_mut().unwrap().remove(field);
            let record = RawColumnRecord::from_value(value).unwrap();
            assert!(adapt(&record).is_err(), "missing {field} must fail");
        }
    }

    #[test]
    fn rejects_negative_counts() {
        let record = with_field(valid_json(), "neuron_count", json!(-1));
        assert_eq!(
            adapt(&record),
            Err(DataError::NegativeCount {
                field: "neuron_count",
                value: -1
            })
        );
    }

    #[test]
    fn adapts_structured_layers() {
        let record = with_field(
            valid_json(),
            "layers",
            json!([
                { "layer_index": 1, "synapse_count": 20, "neuron_count": 2 },
                { "layer_index": 0, "synapse_count": 22, "neuron_count": 3 },
            ]),
        );
        let col = adapt(&record).unwrap();
        assert_eq!(col.layers().len(), 2);
    }

    #[test]
    fn rejects_non_contiguous_layers() {
        let record = with_field(
            valid_json(),
            "layers",
            json!([
                { "layer_index": 0, "synapse_count": 20, "neuron_count": 2 },
                { "layer_index": 2, "synapse_count": 22, "neuron_count": 3 },
            ]),
        );
        assert!(matches!(
            adapt(&record),
            Err(DataError::InvalidLayers(_))
        ));
    }

    #[test]
    fn adapts_flattened_layer_arrays() {
        let mut value = valid_json();
        value["layer_synapses"] = json!([10, 20, 12]);
        value["layer_neurons"] = json!([1, 2, 1]);
        let col = adapt(&RawColumnRecord::from_value(value).unwrap()).unwrap();
        assert_eq!(col.layers().len(), 3);
        assert_eq!(col.layers()[1].synapse_count(), 20);
        assert_eq!(col.layers()[1].layer_index(), 1);
    }

    #[test]
    fn rejects_mismatched_flattened_arrays() {
        let mut value = valid_json();
        value["layer_synapses"] = json!([10, 20]);
        value["layer_neurons"] = json!([1]);
        assert_eq!(
            adapt(&RawColumnRecord::from_value(value).unwrap()),
            Err(DataError::LayerArrayMismatch {
                synapses: 2,
                neurons: 1
            })
        );
    }

    #[test]
    fn adapter_is_pure() {
        let record = valid_record();
        assert_eq!(adapt(&record), adapt(&record));
    }
}
