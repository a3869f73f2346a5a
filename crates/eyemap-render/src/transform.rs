//! Batch placement of processed columns in pixel space.
//!
//! Placement normalizes the batch's native addresses to a zero origin,
//! converts to axial coordinates, applies the linear pixel transform,
//! and finally shifts everything into positive pixel space with a
//! one-hexagon margin so the image dimensions are self-contained.

use eyemap_data::ProcessedColumn;
use eyemap_geometry::{
    hexagon_vertices, normalize_batch, pixel_position, GridConfig, PixelPoint,
};

use crate::RenderError;

/// One column placed at its pixel position.
#[derive(Debug, Clone)]
pub struct PlacedColumn<'a> {
    pub column: &'a ProcessedColumn,
    pub center: PixelPoint,
    pub vertices: [PixelPoint; 6],
}

/// A fully placed batch with its canvas dimensions.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    pub placed: Vec<PlacedColumn<'a>>,
    pub width: f64,
    pub height: f64,
}

/// Converts column addresses to pixel positions.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateTransform {
    config: GridConfig,
}

impl CoordinateTransform {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> GridConfig {
        self.config
    }

    /// Place a batch of columns.
    ///
    /// Adjacency in the native address space becomes geometric
    /// adjacency with no overlap, independent of the region's
    /// coordinate range.
    pub fn place<'a>(&self, columns: &'a [ProcessedColumn]) -> Result<Layout<'a>, RenderError> {
        let coords: Vec<_> = columns.iter().map(|c| c.coordinate).collect();
        let normalized = normalize_batch(&coords)?;

        let centers: Vec<PixelPoint> = normalized
            .iter()
            .map(|c| pixel_position(c.to_axial(), &self.config))
            .collect();

        // Shift into positive pixel space with a one-hexagon margin.
        let margin = self.config.hex_size;
        let min_x = centers.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = centers.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = centers.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = centers.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        let placed = columns
            .iter()
            .zip(centers)
            .map(|(column, c)| {
                let center = PixelPoint {
                    x: c.x - min_x + margin,
                    y: c.y - min_y + margin,
                };
                PlacedColumn {
                    column,
                    center,
                    vertices: hexagon_vertices(center, self.config.hex_size),
                }
            })
            .collect();

        Ok(Layout {
            placed,
            width: max_x - min_x + 2.0 * margin,
            height: max_y - min_y + 2.0 * margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyemap_data::SomaSide;
    use eyemap_geometry::ColumnCoordinate;

    fn processed(h1: i64, h2: i64) -> ProcessedColumn {
        ProcessedColumn {
            coordinate: ColumnCoordinate::new(h1, h2),
            region: "ME".to_string(),
            side: SomaSide::Left,
            value: 1.0,
            layer_values: vec![],
            has_data: true,
        }
    }

    #[test]
    fn empty_batch_is_a_geometry_error() {
        let transform = CoordinateTransform::new(GridConfig::default());
        assert!(matches!(
            transform.place(&[]),
            Err(RenderError::Geometry(_))
        ));
    }

    #[test]
    fn all_centers_inside_canvas_with_margin() {
        let transform = CoordinateTransform::new(GridConfig::default());
        let columns = vec![processed(25, 10), processed(31, 16), processed(28, 12)];
        let layout = transform.place(&columns).unwrap();

        let margin = GridConfig::default().hex_size;
        for p in &layout.placed {
            assert!(p.center.x >= margin - 1e-9 && p.center.x <= layout.width - margin + 1e-9);
            assert!(p.center.y >= margin - 1e-9 && p.center.y <= layout.height - margin + 1e-9);
        }
    }

    #[test]
    fn placement_is_independent_of_coordinate_range() {
        let transform = CoordinateTransform::new(GridConfig::default());
        let near = vec![processed(0, 0), processed(1, 1)];
        let far = vec![processed(1000, 2000), processed(1001, 2001)];

        let a = transform.place(&near).unwrap();
        let b = transform.place(&far).unwrap();
        for (pa, pb) in a.placed.iter().zip(&b.placed) {
            assert!((pa.center.x - pb.center.x).abs() < 1e-9);
            assert!((pa.center.y - pb.center.y).abs() < 1e-9);
        }
    }

    #[test]
    fn distinct_columns_get_distinct_centers() {
        let transform = CoordinateTransform::new(GridConfig::default());
        let columns = vec![processed(5, 5), processed(5, 6), processed(6, 5)];
        let layout = transform.place(&columns).unwrap();
        for (i, a) in layout.placed.iter().enumerate() {
            for b in &layout.placed[i + 1..] {
                let d = ((a.center.x - b.center.x).powi(2)
                    + (a.center.y - b.center.y).powi(2))
                .sqrt();
                assert!(d > GridConfig::default().hex_size);
            }
        }
    }
}
