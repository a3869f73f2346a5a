//! Metric formulas.
//!
//! `metric_value` is the single source of truth for both metrics; every
//! other crate computes column and layer values through it.

use serde::{Deserialize, Serialize};

use crate::{Result, StatsError};

/// Which scalar a hexagon is colored by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    /// Synapses per innervating neuron (raw synapse total when no
    /// neurons innervate the column).
    SynapseDensity,
    /// Number of innervating neurons.
    CellCount,
}

impl MetricType {
    /// Stable lowercase name used in output keys and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SynapseDensity => "synapse_density",
            Self::CellCount => "cell_count",
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compute a metric value from a synapse total and a neuron count.
///
/// - `CellCount` → the neuron count.
/// - `SynapseDensity` → synapses / neurons when neurons > 0, otherwise
///   the raw synapse total unmodified.
///
/// Inputs must be finite and non-negative; this layer is strict even
/// though the color layer downstream tolerates missing values.
///
/// # Examples
///
/// ```
/// use eyemap_stats::{metric_value, MetricType};
///
/// assert_eq!(metric_value(MetricType::CellCount, 120.0, 4.0).unwrap(), 4.0);
/// assert_eq!(metric_value(MetricType::SynapseDensity, 120.0, 4.0).unwrap(), 30.0);
/// assert_eq!(metric_value(MetricType::SynapseDensity, 120.0, 0.0).unwrap(), 120.0);
/// ```
pub fn metric_value(metric: MetricType, total_synapses: f64, neuron_count: f64) -> Result<f64> {
    check_count("synapse", total_synapses)?;
    check_count("neuron", neuron_count)?;

    Ok(match metric {
        MetricType::CellCount => neuron_count,
        MetricType::SynapseDensity => {
            if neuron_count > 0.0 {
                total_synapses / neuron_count
            } else {
                total_synapses
            }
        }
    })
}

fn check_count(label: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(StatsError::NonNumeric { label, value });
    }
    if value < 0.0 {
        return Err(StatsError::Negative { label, value });
    }
    Ok(())
}
