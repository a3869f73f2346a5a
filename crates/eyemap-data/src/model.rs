//! Canonical column entities.
//!
//! [`ColumnData`] is immutable after construction: fields are private
//! and every derived collection downstream (filtered or grouped views)
//! is a new object referencing the same underlying records.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use eyemap_geometry::ColumnCoordinate;
use eyemap_stats::{metric_value, MetricType};

use crate::{DataError, Result, SomaSide};

/// Expected number of layers for the known neuropil regions.
///
/// Unknown region tags return `None`; validation skips the layer-set
/// completeness warning for them.
pub fn expected_layer_count(region: &str) -> Option<usize> {
    match region {
        "ME" => Some(10),
        "LO" => Some(7),
        "LOP" => Some(4),
        _ => None,
    }
}

/// One depth subdivision of a column with its own counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerData {
    layer_index: usize,
    synapse_count: u64,
    neuron_count: u64,
}

impl LayerData {
    /// Create layer data.
    pub const fn new(layer_index: usize, synapse_count: u64, neuron_count: u64) -> Self {
        Self {
            layer_index,
            synapse_count,
            neuron_count,
        }
    }

    pub const fn layer_index(&self) -> usize {
        self.layer_index
    }

    pub const fn synapse_count(&self) -> u64 {
        self.synapse_count
    }

    pub const fn neuron_count(&self) -> u64 {
        self.neuron_count
    }

    /// The layer's derived scalar under a metric.
    pub fn metric_value(&self, metric: MetricType) -> Result<f64> {
        Ok(metric_value(
            metric,
            self.synapse_count as f64,
            self.neuron_count as f64,
        )?)
    }
}

/// One hexagonal sampling unit of a columnar neuropil.
///
/// Immutable after construction. The side is always one of the three
/// canonical variants; `Combined`/`All` are rejected by the
/// constructor so a derived pseudo-side can never be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnData {
    coordinate: ColumnCoordinate,
    region: String,
    side: SomaSide,
    total_synapses: u64,
    neuron_count: u64,
    layers: Vec<LayerData>,
}

impl ColumnData {
    /// Construct a column, enforcing the model invariants: a storable
    /// canonical side and layer indices unique and contiguous from 0.
    pub fn new(
        coordinate: ColumnCoordinate,
        region: impl Into<String>,
        side: SomaSide,
        total_synapses: u64,
        neuron_count: u64,
        layers: Vec<LayerData>,
    ) -> Result<Self> {
        if !side.is_canonical() {
            return Err(DataError::InvalidSide {
                value: side.to_string(),
            });
        }
        check_layer_indices(&layers)?;
        Ok(Self {
            coordinate,
            region: region.into(),
            side,
            total_synapses,
            neuron_count,
            layers,
        })
    }

    pub const fn coordinate(&self) -> ColumnCoordinate {
        self.coordinate
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub const fn side(&self) -> SomaSide {
        self.side
    }

    /// The canonical side code; always present since the constructor
    /// rejects non-canonical sides.
    pub fn side_code(&self) -> char {
        self.side
            .canonical_code()
            .expect("constructor only admits canonical sides")
    }

    pub const fn total_synapses(&self) -> u64 {
        self.total_synapses
    }

    pub const fn neuron_count(&self) -> u64 {
        self.neuron_count
    }

    pub fn layers(&self) -> &[LayerData] {
        &self.layers
    }

    /// The column's derived scalar under a metric.
    pub fn metric_value(&self, metric: MetricType) -> Result<f64> {
        Ok(metric_value(
            metric,
            self.total_synapses as f64,
            self.neuron_count as f64,
        )?)
    }
}

/// Layer indices must be unique and contiguous from 0.
fn check_layer_indices(layers: &[LayerData]) -> Result<()> {
    let mut seen: Vec<usize> = layers.iter().map(LayerData::layer_index).collect();
    seen.sort_unstable();
    for (expected, &actual) in seen.iter().enumerate() {
        if actual != expected {
            return Err(DataError::InvalidLayers(format!(
                "indices must be unique and contiguous from 0, got {seen:?}"
            )));
        }
    }
    Ok(())
}

/// Generation parameters threaded, immutable, through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub metric_type: MetricType,
    pub soma_side: SomaSide,
    pub region_name: String,
    pub neuron_type: String,
}

/// A column after metric computation, ready for rendering.
///
/// `has_data` is false for the zero-valued placeholders synthesized
/// for lattice coordinates with no measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedColumn {
    pub coordinate: ColumnCoordinate,
    pub region: String,
    pub side: SomaSide,
    pub value: f64,
    pub layer_values: Vec<f64>,
    pub has_data: bool,
}

/// The full coordinate lattice of each region+side group, keyed by
/// `"{region}_{side}"`.
///
/// Used to fill cells with no data as empty hexagons: every coordinate
/// present here but absent from the measured input gets a zero-valued
/// placeholder so the rendered lattice always covers the region shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionColumnsMap {
    map: HashMap<String, HashSet<ColumnCoordinate>>,
}

impl RegionColumnsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `"{region}_{side}"` key convention.
    pub fn key(region: &str, side_code: char) -> String {
        format!("{region}_{side_code}")
    }

    /// Register the lattice coordinates of one region+side group.
    pub fn insert(
        &mut self,
        region: &str,
        side_code: char,
        coords: impl IntoIterator<Item = ColumnCoordinate>,
    ) {
        self.map
            .entry(Self::key(region, side_code))
            .or_default()
            .extend(coords);
    }

    /// The lattice for one region+side group, if registered.
    pub fn get(&self, region: &str, side_code: char) -> Option<&HashSet<ColumnCoordinate>> {
        self.map.get(&Self::key(region, side_code))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(h1: i64, h2: i64) -> ColumnCoordinate {
        ColumnCoordinate::new(h1, h2)
    }

    #[test]
    fn construction_rejects_selector_sides() {
        for side in [SomaSide::Combined, SomaSide::All] {
            let err = ColumnData::new(coord(1, 1), "ME", side, 0, 0, vec![]).unwrap_err();
            assert!(matches!(err, DataError::InvalidSide { .. }));
        }
    }

    #[test]
    fn construction_rejects_gapped_layers() {
        let layers = vec![LayerData::new(0, 1, 1), LayerData::new(2, 1, 1)];
        let err = ColumnData::new(coord(1, 1), "ME", SomaSide::Left, 2, 1, layers).unwrap_err();
        assert!(matches!(err, DataError::InvalidLayers(_)));
    }

    #[test]
    fn construction_rejects_duplicate_layers() {
        let layers = vec![LayerData::new(0, 1, 1), LayerData::new(0, 1, 1)];
        let err = ColumnData::new(coord(1, 1), "ME", SomaSide::Left, 2, 1, layers).unwrap_err();
        assert!(matches!(err, DataError::InvalidLayers(_)));
    }

    #[test]
    fn contiguous_layers_accepted_in_any_order() {
        let layers = vec![
            LayerData::new(2, 1, 1),
            LayerData::new(0, 1, 1),
            LayerData::new(1, 1, 1),
        ];
        assert!(ColumnData::new(coord(1, 1), "ME", SomaSide::Left, 3, 1, layers).is_ok());
    }

    #[test]
    fn side_code_matches_each_canonical_side() {
        for (side, code) in [
            (SomaSide::Left, 'L'),
            (SomaSide::Right, 'R'),
            (SomaSide::Middle, 'M'),
        ] {
            let col = ColumnData::new(coord(1, 1), "ME", side, 0, 0, vec![]).unwrap();
            assert_eq!(col.side_code(), code);
        }
    }

    #[test]
    fn column_metric_values() {
        let col =
            ColumnData::new(coord(4, 2), "ME", SomaSide::Right, 120, 4, vec![]).unwrap();
        assert_eq!(col.metric_value(MetricType::CellCount).unwrap(), 4.0);
        assert_eq!(col.metric_value(MetricType::SynapseDensity).unwrap(), 30.0);
    }

    #[test]
    fn layer_metric_delegates_to_single_formula() {
        let layer = LayerData::new(0, 60, 0);
        // No innervating neurons: density falls back to the raw total.
        assert_eq!(layer.metric_value(MetricType::SynapseDensity).unwrap(), 60.0);
    }

    #[test]
    fn region_columns_map_key_convention() {
        assert_eq!(RegionColumnsMap::key("ME", 'L'), "ME_L");

        let mut map = RegionColumnsMap::new();
        map.insert("ME", 'L', [coord(1, 1), coord(1, 2)]);
        assert_eq!(map.get("ME", 'L').unwrap().len(), 2);
        assert!(map.get("ME", 'R').is_none());
    }

    #[test]
    fn expected_layer_counts() {
        assert_eq!(expected_layer_count("ME"), Some(10));
        assert_eq!(expected_layer_count("LO"), Some(7));
        assert_eq!(expected_layer_count("LOP"), Some(4));
        assert_eq!(expected_layer_count("AME"), None);
    }
}
