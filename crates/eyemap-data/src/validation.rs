//! Batch consistency checks over canonical columns.
//!
//! Strict mode is used for production generation: any error aborts the
//! batch with no partial output. Lenient mode downgrades the layer-sum
//! consistency check to a warning, allowing best-effort diagnostics
//! runs over imperfect data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::expected_layer_count;
use crate::ColumnData;

/// How hard the validator pushes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// Consistency violations are errors; the batch aborts.
    Strict,
    /// Consistency violations are warnings; processing continues.
    Lenient,
}

/// Outcome of validating one batch of columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no findings.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn error(&mut self, message: String) {
        self.errors.push(message);
        self.is_valid = false;
    }

    fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// Validates batches of canonical columns.
#[derive(Debug, Clone, Copy)]
pub struct ValidationManager {
    mode: ValidationMode,
    /// Absolute slack allowed between a column's synapse total and the
    /// sum of its per-layer synapse counts.
    layer_sum_tolerance: u64,
}

impl ValidationManager {
    /// Create a validator with zero layer-sum tolerance.
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            layer_sum_tolerance: 0,
        }
    }

    /// Adjust the layer-sum slack.
    pub fn with_layer_sum_tolerance(mut self, tolerance: u64) -> Self {
        self.layer_sum_tolerance = tolerance;
        self
    }

    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Check a batch of columns for internal consistency.
    ///
    /// Findings, in check order: duplicate coordinates within a
    /// region+side group (error), layer synapse sums inconsistent with
    /// the column total beyond tolerance (error in strict mode, warning
    /// in lenient), and columns missing their region's expected full
    /// layer set (warning). Per-layer neuron counts are not summed:
    /// one neuron can innervate several layers.
    pub fn validate(&self, columns: &[ColumnData]) -> ValidationResult {
        let mut result = ValidationResult::valid();

        let mut seen = HashSet::new();
        for col in columns {
            let key = (col.region().to_string(), col.side_code(), col.coordinate());
            if !seen.insert(key) {
                result.error(format!(
                    "duplicate coordinate {} in {}_{}",
                    col.coordinate(),
                    col.region(),
                    col.side_code(),
                ));
            }
        }

        for col in columns {
            self.check_layer_sum(col, &mut result);
            check_layer_set(col, &mut result);
        }

        debug!(
            columns = columns.len(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated column batch"
        );
        result
    }

    fn check_layer_sum(&self, col: &ColumnData, result: &mut ValidationResult) {
        if col.layers().is_empty() {
            return;
        }
        let layer_sum: u64 = col.layers().iter().map(|l| l.synapse_count()).sum();
        let diff = layer_sum.abs_diff(col.total_synapses());
        if diff > self.layer_sum_tolerance {
            let message = format!(
                "column {} in {}_{}: layer synapse sum {} differs from total {} by {}",
                col.coordinate(),
                col.region(),
                col.side_code(),
                layer_sum,
                col.total_synapses(),
                diff,
            );
            match self.mode {
                ValidationMode::Strict => result.error(message),
                ValidationMode::Lenient => result.warning(message),
            }
        }
    }
}

/// Columns with no layer breakdown at all are summary-only input, a
/// valid shape per the ingestion contract; the layer-set check only
/// fires when a partial breakdown is present.
fn check_layer_set(col: &ColumnData, result: &mut ValidationResult) {
    let Some(expected) = expected_layer_count(col.region()) else {
        return;
    };
    if !col.layers().is_empty() && col.layers().len() != expected {
        result.warning(format!(
            "column {} in {}_{}: has {} layers, expected {}",
            col.coordinate(),
            col.region(),
            col.side_code(),
            col.layers().len(),
            expected,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LayerData, SomaSide};
    use eyemap_geometry::ColumnCoordinate;

    fn column(h1: i64, h2: i64, side: SomaSide) -> ColumnData {
        ColumnData::new(
            ColumnCoordinate::new(h1, h2),
            "ME",
            side,
            100,
            5,
            vec![],
        )
        .unwrap()
    }

    fn column_with_layers(total: u64, layer_synapses: &[u64]) -> ColumnData {
        let layers = layer_synapses
            .iter()
            .enumerate()
            .map(|(i, &s)| LayerData::new(i, s, 1))
            .collect();
        ColumnData::new(
            ColumnCoordinate::new(1, 1),
            "ME",
            SomaSide::Left,
            total,
            5,
            layers,
        )
        .unwrap()
    }

    #[test]
    fn clean_batch_is_valid() {
        let batch = [column(1, 1, SomaSide::Left), column(1, 2, SomaSide::Left)];
        let result = ValidationManager::new(ValidationMode::Strict).validate(&batch);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn duplicate_coordinate_in_same_group_is_error() {
        let batch = [column(1, 1, SomaSide::Left), column(1, 1, SomaSide::Left)];
        let result = ValidationManager::new(ValidationMode::Lenient).validate(&batch);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("duplicate"));
    }

    #[test]
    fn same_coordinate_different_side_is_fine() {
        let batch = [column(1, 1, SomaSide::Left), column(1, 1, SomaSide::Right)];
        let result = ValidationManager::new(ValidationMode::Strict).validate(&batch);
        assert!(result.is_valid);
    }

    #[test]
    fn layer_sum_mismatch_is_mode_dependent() {
        // Layers sum to 90 against a total of 100.
        let batch = [column_with_layers(100, &[30, 30, 30])];

        let strict = ValidationManager::new(ValidationMode::Strict).validate(&batch);
        assert!(!strict.is_valid);
        assert_eq!(strict.errors.len(), 1);

        let lenient = ValidationManager::new(ValidationMode::Lenient).validate(&batch);
        assert!(lenient.is_valid);
        assert_eq!(lenient.warnings.len(), 2); // sum mismatch + layer-set size
    }

    #[test]
    fn tolerance_absorbs_small_mismatch() {
        let batch = [column_with_layers(100, &[50, 49])];
        let result = ValidationManager::new(ValidationMode::Strict)
            .with_layer_sum_tolerance(2)
            .validate(&batch);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn summary_only_column_skips_layer_set_warning() {
        // No layer breakdown at all: valid summary-only input, unlike a
        // partial breakdown.
        let batch = [column(1, 1, SomaSide::Left)];
        let result = ValidationManager::new(ValidationMode::Strict).validate(&batch);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_layer_set_is_warning() {
        // ME expects 10 layers; 2 supplied.
        let batch = [column_with_layers(100, &[50, 50])];
        let result = ValidationManager::new(ValidationMode::Strict).validate(&batch);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("expected 10"));
    }
}
