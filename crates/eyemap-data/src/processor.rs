//! Pipeline orchestration: validate, compute metrics, fill gaps.
//!
//! Validation runs to completion before any metric computation begins.
//! In strict mode an invalid batch aborts with the complete error list
//! and no output columns, never a partially-populated result.

use std::collections::HashSet;

use tracing::{debug, info};

use eyemap_geometry::ColumnCoordinate;
use eyemap_stats::{MetricType, MinMaxData};

use crate::validation::{ValidationManager, ValidationMode, ValidationResult};
use crate::{adapt, ColumnData, ProcessedColumn, ProcessingConfig, RawColumnRecord, RegionColumnsMap};

/// Outcome of one processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingResult {
    pub is_successful: bool,
    pub columns: Vec<ProcessedColumn>,
    pub validation: ValidationResult,
}

impl ProcessingResult {
    fn failed(validation: ValidationResult) -> Self {
        Self {
            is_successful: false,
            columns: Vec::new(),
            validation,
        }
    }
}

/// Orchestrates adapter → validation → metrics → gap filling.
#[derive(Debug, Clone, Copy)]
pub struct DataProcessor {
    validator: ValidationManager,
}

impl DataProcessor {
    /// Create a processor validating in the given mode.
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            validator: ValidationManager::new(mode),
        }
    }

    /// Create a processor around a configured validator.
    pub fn with_validator(validator: ValidationManager) -> Self {
        Self { validator }
    }

    /// Lenient ingestion helper: convert raw summary records into
    /// structured columns, collecting per-record error messages
    /// instead of aborting on the first bad row.
    pub fn columns_from_raw(
        &self,
        raw: &[RawColumnRecord],
    ) -> (Vec<ColumnData>, Vec<String>) {
        let mut columns = Vec::with_capacity(raw.len());
        let mut errors = Vec::new();
        for (i, record) in raw.iter().enumerate() {
            match adapt(record) {
                Ok(col) => columns.push(col),
                Err(e) => errors.push(format!("record {i}: {e}")),
            }
        }
        debug!(
            adapted = columns.len(),
            rejected = errors.len(),
            "converted raw records to structured columns"
        );
        (columns, errors)
    }

    /// Run the full pipeline over structured columns.
    ///
    /// After validation, each column's metric value is computed per
    /// `config.metric_type`; then a zero-valued placeholder is
    /// synthesized for every coordinate present in the region's
    /// lattice (`region_columns_map` under `"{region}_{side}"`, plus
    /// `all_possible`) but absent from the input, so the rendered
    /// lattice covers the full region shape including empty cells.
    pub fn process(
        &self,
        columns: &[ColumnData],
        all_possible: &[ColumnCoordinate],
        region_columns_map: &RegionColumnsMap,
        config: &ProcessingConfig,
    ) -> ProcessingResult {
        let validation = self.validator.validate(columns);
        if !validation.is_valid && self.validator.mode() == ValidationMode::Strict {
            info!(
                errors = validation.errors.len(),
                region = %config.region_name,
                "strict validation failed, aborting batch"
            );
            return ProcessingResult::failed(validation);
        }

        let mut validation = validation;
        let mut processed = Vec::with_capacity(columns.len());
        for col in columns {
            match processed_from(col, config.metric_type) {
                Ok(p) => processed.push(p),
                Err(e) => validation.errors.push(format!(
                    "column {}: {e}",
                    col.coordinate()
                )),
            }
        }
        if !validation.errors.is_empty() && processed.len() != columns.len() {
            validation.is_valid = false;
            return ProcessingResult::failed(validation);
        }

        self.fill_gaps(&mut processed, columns, all_possible, region_columns_map, config);

        ProcessingResult {
            is_successful: true,
            columns: processed,
            validation,
        }
    }

    /// Synthesize placeholders for lattice coordinates with no data.
    fn fill_gaps(
        &self,
        processed: &mut Vec<ProcessedColumn>,
        columns: &[ColumnData],
        all_possible: &[ColumnCoordinate],
        region_columns_map: &RegionColumnsMap,
        config: &ProcessingConfig,
    ) {
        let present: HashSet<ColumnCoordinate> =
            columns.iter().map(ColumnData::coordinate).collect();

        let mut lattice: HashSet<ColumnCoordinate> = all_possible.iter().copied().collect();
        if let Some(code) = config.soma_side.canonical_code() {
            if let Some(coords) = region_columns_map.get(&config.region_name, code) {
                lattice.extend(coords.iter().copied());
            }
        }

        let mut missing: Vec<ColumnCoordinate> =
            lattice.difference(&present).copied().collect();
        missing.sort_unstable();

        debug!(
            placeholders = missing.len(),
            region = %config.region_name,
            "filling lattice gaps"
        );
        for coordinate in missing {
            processed.push(ProcessedColumn {
                coordinate,
                region: config.region_name.clone(),
                side: config.soma_side,
                value: 0.0,
                layer_values: Vec::new(),
                has_data: false,
            });
        }
    }
}

fn processed_from(col: &ColumnData, metric: MetricType) -> crate::Result<ProcessedColumn> {
    let value = col.metric_value(metric)?;
    let layer_values = col
        .layers()
        .iter()
        .map(|l| l.metric_value(metric))
        .collect::<crate::Result<Vec<f64>>>()?;
    Ok(ProcessedColumn {
        coordinate: col.coordinate(),
        region: col.region().to_string(),
        side: col.side(),
        value,
        layer_values,
        has_data: true,
    })
}

/// Build the shared per-region min/max context over every column of
/// one neuron type, across all sides, before any render begins.
pub fn build_minmax(columns: &[ColumnData]) -> MinMaxData {
    let mut builder = MinMaxData::builder();
    for col in columns {
        builder.observe(
            col.region(),
            col.total_synapses() as f64,
            col.neuron_count() as f64,
        );
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SomaSide;
    use serde_json::json;

    fn coord(h1: i64, h2: i64) -> ColumnCoordinate {
        ColumnCoordinate::new(h1, h2)
    }

    fn column(h1: i64, h2: i64, side: SomaSide, synapses: u64, neurons: u64) -> ColumnData {
        ColumnData::new(coord(h1, h2), "ME", side, synapses, neurons, vec![]).unwrap()
    }

    fn config(metric: MetricType, side: SomaSide) -> ProcessingConfig {
        ProcessingConfig {
            metric_type: metric,
            soma_side: side,
            region_name: "ME".to_string(),
            neuron_type: "Tm1".to_string(),
        }
    }

    #[test]
    fn strict_invalid_batch_returns_no_columns() {
        let dup = [
            column(1, 1, SomaSide::Left, 10, 1),
            column(1, 1, SomaSide::Left, 20, 2),
        ];
        let processor = DataProcessor::new(ValidationMode::Strict);
        let result = processor.process(
            &dup,
            &[],
            &RegionColumnsMap::new(),
            &config(MetricType::CellCount, SomaSide::Left),
        );
        assert!(!result.is_successful);
        assert!(result.columns.is_empty());
        assert_eq!(result.validation.errors.len(), 1);
    }

    #[test]
    fn lenient_mode_continues_past_warnings() {
        let dup = [
            column(1, 1, SomaSide::Left, 10, 1),
            column(1, 1, SomaSide::Left, 20, 2),
        ];
        let processor = DataProcessor::new(ValidationMode::Lenient);
        let result = processor.process(
            &dup,
            &[],
            &RegionColumnsMap::new(),
            &config(MetricType::CellCount, SomaSide::Left),
        );
        // Duplicate coordinates stay an error in the report, but the
        // lenient run still produces output.
        assert!(result.is_successful);
        assert_eq!(result.columns.len(), 2);
        assert!(!result.validation.is_valid);
    }

    #[test]
    fn metric_values_follow_config() {
        let cols = [column(1, 1, SomaSide::Left, 120, 4)];
        let processor = DataProcessor::new(ValidationMode::Strict);

        let cells = processor.process(
            &cols,
            &[],
            &RegionColumnsMap::new(),
            &config(MetricType::CellCount, SomaSide::Left),
        );
        assert_eq!(cells.columns[0].value, 4.0);

        let density = processor.process(
            &cols,
            &[],
            &RegionColumnsMap::new(),
            &config(MetricType::SynapseDensity, SomaSide::Left),
        );
        assert_eq!(density.columns[0].value, 30.0);
    }

    #[test]
    fn lattice_gaps_become_zero_placeholders() {
        let cols = [
            column(1, 1, SomaSide::Left, 100, 50),
            column(1, 2, SomaSide::Left, 80, 40),
        ];
        let mut region_map = RegionColumnsMap::new();
        region_map.insert("ME", 'L', [coord(1, 1), coord(1, 2), coord(2, 1)]);

        let processor = DataProcessor::new(ValidationMode::Strict);
        let result = processor.process(
            &cols,
            &[],
            &region_map,
            &config(MetricType::CellCount, SomaSide::Left),
        );
        assert!(result.is_successful);
        assert_eq!(result.columns.len(), 3);

        let values: Vec<f64> = result.columns[..2].iter().map(|c| c.value).collect();
        assert_eq!(values, vec![50.0, 40.0]);

        let placeholder = &result.columns[2];
        assert_eq!(placeholder.coordinate, coord(2, 1));
        assert_eq!(placeholder.value, 0.0);
        assert!(!placeholder.has_data);
    }

    #[test]
    fn processing_is_deterministic() {
        let raw: Vec<RawColumnRecord> = (0..5)
            .map(|i| {
                RawColumnRecord::from_value(json!({
                    "hex1": i,
                    "hex2": i % 3,
                    "region": "ME",
                    "side": "L",
                    "total_synapses": 10 * i,
                    "neuron_count": i,
                }))
                .unwrap()
            })
            .collect();

        let processor = DataProcessor::new(ValidationMode::Strict);
        let cfg = config(MetricType::SynapseDensity, SomaSide::Left);
        let region_map = RegionColumnsMap::new();

        let run = |raw: &[RawColumnRecord]| {
            let (cols, errors) = processor.columns_from_raw(raw);
            assert!(errors.is_empty());
            processor.process(&cols, &[coord(9, 9)], &region_map, &cfg)
        };
        assert_eq!(run(&raw), run(&raw));
    }

    #[test]
    fn columns_from_raw_collects_errors() {
        let raw = [
            RawColumnRecord::from_value(json!({
                "hex1": 1, "hex2": 1, "region": "ME", "side": "L",
                "total_synapses": 5, "neuron_count": 1,
            }))
            .unwrap(),
            RawColumnRecord::from_value(json!({ "hex1": 2 })).unwrap(),
        ];
        let processor = DataProcessor::new(ValidationMode::Lenient);
        let (cols, errors) = processor.columns_from_raw(&raw);
        assert_eq!(cols.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("record 1:"));
    }

    #[test]
    fn minmax_spans_all_sides() {
        let cols = [
            column(1, 1, SomaSide::Left, 10, 2),
            column(1, 2, SomaSide::Right, 90, 8),
        ];
        let minmax = build_minmax(&cols);
        assert_eq!(
            minmax.range_for("ME", MetricType::CellCount),
            Some((2.0, 8.0))
        );
        assert_eq!(
            minmax.range_for("ME", MetricType::SynapseDensity),
            Some((10.0, 90.0))
        );
    }
}
