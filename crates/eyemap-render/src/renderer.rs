//! Region rendering and the parallel region × metric sweep.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use eyemap_color::{Color, ColorMapper, ColorPalette};
use eyemap_data::{ProcessedColumn, SomaSide};
use eyemap_geometry::GridConfig;
use eyemap_stats::{calculate_thresholds, MetricType, MinMaxData};

use crate::svg::{render_svg, SvgContext};
use crate::transform::CoordinateTransform;
use crate::{png, RenderError};

/// Output encoding for one rendered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Inline SVG markup.
    Svg,
    /// PNG encoded as a base64 data URI.
    Png,
}

/// Processed columns grouped by region, the input to a full sweep.
pub type RegionSummary = BTreeMap<String, Vec<ProcessedColumn>>;

/// Outcome of a full region × metric sweep.
///
/// Combinations are isolated: `outputs` holds the successful subset
/// and `failures` an explicit marker for each combination that failed,
/// so the report degrades gracefully instead of failing entirely.
#[derive(Debug, Clone, Default)]
pub struct RenderReport {
    pub outputs: BTreeMap<String, String>,
    pub failures: BTreeMap<String, String>,
}

impl RenderReport {
    /// The `"{region}_{metric}"` key for one combination.
    pub fn key(region: &str, metric: MetricType) -> String {
        format!("{region}_{metric}")
    }
}

/// One hexagon's computed colors.
#[derive(Debug, Clone)]
pub(crate) struct HexCell {
    pub fill: Color,
    pub layer_colors: Vec<Color>,
}

/// Renders processed columns as hexagonal-grid images.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    transform: CoordinateTransform,
    mapper: ColorMapper,
    /// When set, per-layer threshold boundaries with this many buckets
    /// are computed across the batch and attached to every hexagon as
    /// `data-layer-thresholds`.
    layer_threshold_buckets: Option<usize>,
}

impl GridRenderer {
    /// A renderer over the default palette.
    pub fn new(grid: GridConfig) -> Self {
        Self {
            transform: CoordinateTransform::new(grid),
            mapper: ColorMapper::new(ColorPalette::default()),
            layer_threshold_buckets: None,
        }
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.mapper = ColorMapper::new(palette);
        self
    }

    /// Enable the `data-layer-thresholds` attribute.
    pub fn with_layer_thresholds(mut self, buckets: usize) -> Self {
        self.layer_threshold_buckets = Some(buckets);
        self
    }

    /// Render one region under one metric.
    ///
    /// `min_value`/`max_value` fix the color normalization range so the
    /// render stays comparable with its siblings; min == max is the
    /// defined degenerate single-color case.
    #[allow(clippy::too_many_arguments)]
    pub fn render_region(
        &self,
        columns: &[ProcessedColumn],
        metric: MetricType,
        label: &str,
        min_value: f64,
        max_value: f64,
        neuron_type: &str,
        soma_side: SomaSide,
        format: OutputFormat,
    ) -> Result<String, RenderError> {
        if columns.is_empty() {
            return Err(RenderError::EmptyRegion(label.to_string()));
        }
        let layout = self.transform.place(columns)?;

        let range = Some((min_value, max_value));
        let values: Vec<Option<f64>> = columns
            .iter()
            .map(|c| c.has_data.then_some(c.value))
            .collect();
        // The two batch entry points share one color routine; picking
        // by metric only changes the diagnostic label.
        let fills = match metric {
            MetricType::SynapseDensity => self.mapper.map_synapse_colors(&values, range),
            MetricType::CellCount => self.mapper.map_neuron_colors(&values, range),
        };

        let cells: Vec<HexCell> = columns
            .iter()
            .zip(fills)
            .map(|(col, fill)| HexCell {
                fill,
                layer_colors: col
                    .layer_values
                    .iter()
                    .map(|&v| self.mapper.map_value_to_color(v, min_value, max_value))
                    .collect(),
            })
            .collect();

        let layer_thresholds = self.layer_thresholds(columns);
        let side_label = soma_side.to_string();
        let ctx = SvgContext {
            label,
            neuron_type,
            soma_side: &side_label,
            layer_thresholds: layer_thresholds.as_deref(),
        };

        debug!(
            region = label,
            metric = %metric,
            columns = columns.len(),
            "rendering region"
        );
        match format {
            OutputFormat::Svg => render_svg(&layout, &cells, &ctx),
            OutputFormat::Png => png::render_png(&layout, &cells),
        }
    }

    /// Render every region of a summary under both metrics.
    ///
    /// The sweep fans out over a rayon pool; every combination reads
    /// only the immutable `minmax` context, which must be fully built
    /// before this call. A failed combination is recorded in the
    /// report and never aborts its siblings.
    pub fn render_all_regions(
        &self,
        summary: &RegionSummary,
        minmax: &MinMaxData,
        neuron_type: &str,
        soma_side: SomaSide,
        format: OutputFormat,
    ) -> RenderReport {
        let combos: Vec<(&String, &Vec<ProcessedColumn>, MetricType)> = summary
            .iter()
            .flat_map(|(region, columns)| {
                [MetricType::SynapseDensity, MetricType::CellCount]
                    .into_iter()
                    .map(move |m| (region, columns, m))
            })
            .collect();

        let results: Vec<(String, Result<String, RenderError>)> = combos
            .par_iter()
            .map(|(region, columns, metric)| {
                let key = RenderReport::key(region, *metric);
                let rendered = self.render_combination(
                    region, columns, *metric, minmax, neuron_type, soma_side, format,
                );
                (key, rendered)
            })
            .collect();

        let mut report = RenderReport::default();
        for (key, result) in results {
            match result {
                Ok(output) => {
                    report.outputs.insert(key, output);
                }
                Err(e) => {
                    warn!(combination = %key, error = %e, "render failed");
                    report.failures.insert(key, e.to_string());
                }
            }
        }
        report
    }

    #[allow(clippy::too_many_arguments)]
    fn render_combination(
        &self,
        region: &str,
        columns: &[ProcessedColumn],
        metric: MetricType,
        minmax: &MinMaxData,
        neuron_type: &str,
        soma_side: SomaSide,
        format: OutputFormat,
    ) -> Result<String, RenderError> {
        let (min_value, max_value) =
            minmax
                .range_for(region, metric)
                .ok_or_else(|| RenderError::MissingRange {
                    region: region.to_string(),
                    metric,
                })?;
        self.render_region(
            columns, metric, region, min_value, max_value, neuron_type, soma_side, format,
        )
    }

    fn layer_thresholds(&self, columns: &[ProcessedColumn]) -> Option<Vec<f64>> {
        let buckets = self.layer_threshold_buckets?;
        let values: Vec<f64> = columns
            .iter()
            .filter(|c| c.has_data)
            .flat_map(|c| c.layer_values.iter().copied())
            .collect();
        calculate_thresholds(&values, buckets).ok()
    }
}
