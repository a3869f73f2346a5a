//! Pixel layout of the hexagonal grid.
//!
//! Flat-top hexagons. The axial→pixel transform is the standard linear
//! map scaled by `hex_size × spacing_factor`:
//!
//! ```text
//! x = size·spacing·(3/2)·q
//! y = size·spacing·(√3/2·q + √3·r)
//! ```
//!
//! With spacing_factor ≥ 1 neighboring hexagons never overlap.

use crate::hex::{AxialCoord, ColumnCoordinate};
use crate::GeometryError;

/// Scale configuration for the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Circumradius of one hexagon in pixels.
    pub hex_size: f64,
    /// Multiplier on the nominal center-to-center distance. 1.0 packs
    /// hexagons edge-to-edge; larger values open gaps between cells.
    pub spacing_factor: f64,
}

impl GridConfig {
    /// Create a config, rejecting non-positive scales.
    pub fn new(hex_size: f64, spacing_factor: f64) -> Result<Self, GeometryError> {
        if hex_size <= 0.0 || spacing_factor <= 0.0 {
            return Err(GeometryError::InvalidScale {
                hex_size,
                spacing_factor,
            });
        }
        Ok(Self {
            hex_size,
            spacing_factor,
        })
    }

    /// Combined scale applied to the axial→pixel map.
    pub fn scale(&self) -> f64 {
        self.hex_size * self.spacing_factor
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hex_size: 6.0,
            spacing_factor: 1.1,
        }
    }
}

/// A 2D point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Translate a batch of native addresses so the per-axis minimum is zero.
///
/// Returns the translated addresses in input order. The translation makes
/// the rendered layout independent of each region's coordinate range.
///
/// # Errors
///
/// [`GeometryError::EmptyBatch`] when no coordinates are supplied.
pub fn normalize_batch(
    coords: &[ColumnCoordinate],
) -> Result<Vec<ColumnCoordinate>, GeometryError> {
    let origin = batch_origin(coords)?;
    Ok(coords.iter().map(|&c| c - origin).collect())
}

/// Per-axis minimum of a batch: the origin subtracted during normalization.
pub fn batch_origin(coords: &[ColumnCoordinate]) -> Result<ColumnCoordinate, GeometryError> {
    let first = coords.first().ok_or(GeometryError::EmptyBatch)?;
    let mut origin = *first;
    for c in &coords[1..] {
        origin.hex1 = origin.hex1.min(c.hex1);
        origin.hex2 = origin.hex2.min(c.hex2);
    }
    Ok(origin)
}

/// Pixel position of a hexagon center.
pub fn pixel_position(axial: AxialCoord, config: &GridConfig) -> PixelPoint {
    let scale = config.scale();
    let q = axial.q as f64;
    let r = axial.r as f64;
    let sqrt3 = 3.0_f64.sqrt();
    PixelPoint {
        x: scale * 1.5 * q,
        y: scale * (sqrt3 / 2.0 * q + sqrt3 * r),
    }
}

/// The six vertices of a flat-top hexagon centered at `center`.
///
/// Vertex 0 is due east; the rest proceed counterclockwise in screen
/// coordinates (y grows downward, so visually clockwise).
pub fn hexagon_vertices(center: PixelPoint, hex_size: f64) -> [PixelPoint; 6] {
    let mut vertices = [PixelPoint::default(); 6];
    for (i, v) in vertices.iter_mut().enumerate() {
        let angle = std::f64::consts::PI / 3.0 * i as f64;
        v.x = center.x + hex_size * angle.cos();
        v.y = center.y + hex_size * angle.sin();
    }
    vertices
}
