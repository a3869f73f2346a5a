//! Value-to-color mapping.
//!
//! `map_synapse_colors` and `map_neuron_colors` exist so batch
//! diagnostics name the quantity being mapped; they delegate to one
//! shared routine and produce identical output for identical numeric
//! input. Color logic lives in exactly one place.

use tracing::debug;

use crate::{Color, ColorPalette};

/// Maps scalar metric values onto a discrete palette.
#[derive(Debug, Clone, Default)]
pub struct ColorMapper {
    palette: ColorPalette,
}

impl ColorMapper {
    /// Create a mapper over the given palette.
    pub fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    /// The underlying palette.
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Map one value into the palette over a `[min, max]` range.
    ///
    /// The value is normalized as `(value - min) / (max - min)`, clipped
    /// to [0, 1] (0 when min == max), then bucket
    /// `round(normalized × (N-1))` is selected. Non-finite values map to
    /// the no-data color.
    pub fn map_value_to_color(&self, value: f64, min: f64, max: f64) -> Color {
        if !value.is_finite() {
            return self.palette.no_data();
        }
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let index = (normalized * (self.palette.len() - 1) as f64).round() as usize;
        self.palette.color_at(index)
    }

    /// Map a batch of synapse-metric values.
    ///
    /// `range` fixes the normalization to an explicit `[lo, hi]` so
    /// scales stay comparable across renders; when absent the batch's
    /// own finite min/max is used. Absent values map to the no-data
    /// color without aborting the batch.
    pub fn map_synapse_colors(
        &self,
        values: &[Option<f64>],
        range: Option<(f64, f64)>,
    ) -> Vec<Color> {
        self.map_batch("synapse", values, range)
    }

    /// Map a batch of neuron-count values. Identical color logic to
    /// [`map_synapse_colors`](Self::map_synapse_colors); only the
    /// diagnostic label differs.
    pub fn map_neuron_colors(
        &self,
        values: &[Option<f64>],
        range: Option<(f64, f64)>,
    ) -> Vec<Color> {
        self.map_batch("neuron", values, range)
    }

    fn map_batch(
        &self,
        label: &'static str,
        values: &[Option<f64>],
        range: Option<(f64, f64)>,
    ) -> Vec<Color> {
        let (min, max) = range.unwrap_or_else(|| batch_range(values));
        let absent = values
            .iter()
            .filter(|v| !matches!(v, Some(x) if x.is_finite()))
            .count();
        if absent > 0 {
            debug!(
                label,
                absent,
                total = values.len(),
                "mapping batch with missing values to no-data color"
            );
        }
        values
            .iter()
            .map(|v| match v {
                Some(x) => self.map_value_to_color(*x, min, max),
                None => self.palette.no_data(),
            })
            .collect()
    }
}

/// Finite min/max of a batch; `(0, 0)` when nothing is finite.
fn batch_range(values: &[Option<f64>]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.iter().flatten().filter(|x| x.is_finite()) {
        min = min.min(*v);
        max = max.max(*v);
    }
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> ColorMapper {
        ColorMapper::new(ColorPalette::default())
    }

    #[test]
    fn endpoints_map_to_lightest_and_darkest() {
        let m = mapper();
        assert_eq!(m.map_value_to_color(0.0, 0.0, 10.0), m.palette().lightest());
        assert_eq!(m.map_value_to_color(10.0, 0.0, 10.0), m.palette().darkest());
    }

    #[test]
    fn degenerate_range_maps_to_lightest() {
        let m = mapper();
        assert_eq!(m.map_value_to_color(5.0, 5.0, 5.0), m.palette().lightest());
    }

    #[test]
    fn out_of_range_values_are_clipped() {
        let m = mapper();
        assert_eq!(
            m.map_value_to_color(-100.0, 0.0, 10.0),
            m.palette().lightest()
        );
        assert_eq!(
            m.map_value_to_color(1e9, 0.0, 10.0),
            m.palette().darkest()
        );
    }

    #[test]
    fn bucket_selection_rounds() {
        // 5 colors, range [0, 4]: value 1.4 → normalized 0.35 → index 1.
        let m = mapper();
        let c = m.map_value_to_color(1.4, 0.0, 4.0);
        assert_eq!(c, m.palette().color_at(1));
    }

    #[test]
    fn synapse_and_neuron_batches_are_identical() {
        let m = mapper();
        let values = vec![Some(1.0), None, Some(2.5), Some(f64::NAN), Some(9.0)];
        for range in [None, Some((0.0, 10.0))] {
            assert_eq!(
                m.map_synapse_colors(&values, range),
                m.map_neuron_colors(&values, range)
            );
        }
    }

    #[test]
    fn absent_values_map_to_no_data_without_aborting() {
        let m = mapper();
        let colors = m.map_synapse_colors(&[Some(0.0), None, Some(10.0)], None);
        assert_eq!(colors[0], m.palette().lightest());
        assert_eq!(colors[1], m.palette().no_data());
        assert_eq!(colors[2], m.palette().darkest());
    }

    #[test]
    fn explicit_range_overrides_batch_extrema() {
        let m = mapper();
        // Batch max is 2.0 but the fixed range tops out at 100, so the
        // batch stays in the light end of the ramp.
        let colors = m.map_neuron_colors(&[Some(2.0)], Some((0.0, 100.0)));
        assert_eq!(colors[0], m.palette().color_at(0));
    }

    #[test]
    fn all_absent_batch_is_all_no_data() {
        let m = mapper();
        let colors = m.map_synapse_colors(&[None, None], None);
        assert!(colors.iter().all(|c| *c == m.palette().no_data()));
    }
}
