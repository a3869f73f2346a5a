//! Per-region min/max context shared across renders.
//!
//! Built once per generation run over every side of one neuron type, so
//! the left, right, and middle renders of a region share one comparable
//! color scale. Passed by reference, read-only, into every render call;
//! it must be fully built before any render begins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::MetricType;

/// Observed extrema for one region.
///
/// Invariant: min ≤ max for both pairs. min == max is the valid
/// degenerate case where the color layer produces a single color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxEntry {
    pub min_synapses: f64,
    pub max_synapses: f64,
    pub min_cells: f64,
    pub max_cells: f64,
}

/// Per-region extrema of synapse totals and cell counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinMaxData {
    entries: HashMap<String, MinMaxEntry>,
}

impl MinMaxData {
    /// Start accumulating extrema.
    pub fn builder() -> MinMaxBuilder {
        MinMaxBuilder::default()
    }

    /// Extrema for a region, if any column of it was observed.
    pub fn get(&self, region: &str) -> Option<&MinMaxEntry> {
        self.entries.get(region)
    }

    /// The `[min, max]` normalization range for one region and metric.
    pub fn range_for(&self, region: &str, metric: MetricType) -> Option<(f64, f64)> {
        self.entries.get(region).map(|e| match metric {
            MetricType::SynapseDensity => (e.min_synapses, e.max_synapses),
            MetricType::CellCount => (e.min_cells, e.max_cells),
        })
    }

    /// Regions with observed data.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulator for [`MinMaxData`].
#[derive(Debug, Default)]
pub struct MinMaxBuilder {
    entries: HashMap<String, MinMaxEntry>,
}

impl MinMaxBuilder {
    /// Fold one column's synapse-metric value and cell count into the
    /// extrema of its region.
    pub fn observe(&mut self, region: &str, synapse_value: f64, cell_value: f64) {
        match self.entries.get_mut(region) {
            Some(e) => {
                e.min_synapses = e.min_synapses.min(synapse_value);
                e.max_synapses = e.max_synapses.max(synapse_value);
                e.min_cells = e.min_cells.min(cell_value);
                e.max_cells = e.max_cells.max(cell_value);
            }
            None => {
                self.entries.insert(
                    region.to_string(),
                    MinMaxEntry {
                        min_synapses: synapse_value,
                        max_synapses: synapse_value,
                        min_cells: cell_value,
                        max_cells: cell_value,
                    },
                );
            }
        }
    }

    /// Finish accumulation.
    pub fn build(self) -> MinMaxData {
        MinMaxData {
            entries: self.entries,
        }
    }
}
