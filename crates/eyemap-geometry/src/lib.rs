//! Eyemap Column Geometry
//!
//! Hexagonal coordinate handling for columnar neuropil eyemaps.
//!
//! # Coordinate spaces
//!
//! Columns arrive addressed in a *native offset* space: two integer axes
//! `(hex1, hex2)` assigned by the reconstruction, unique within one
//! region+side group but with an arbitrary origin per region. Rendering
//! goes through three stages:
//!
//! 1. **Normalization**: translate the batch so the per-axis minimum is
//!    zero, making layout independent of each region's coordinate range.
//! 2. **Axial conversion**: map the offset pair to axial hex coordinates
//!    `(q, r)` with the implicit third axis `s = -q - r`.
//! 3. **Pixel placement**: a linear transform of `(q, r)` scaled by the
//!    configured hexagon size and spacing factor.
//!
//! Adjacency in the native address space renders as geometric adjacency
//! with no overlap; the guarantees are exercised by the tests in
//! [`layout`].

mod hex;
mod layout;

pub use hex::{AxialCoord, ColumnCoordinate};
pub use layout::{hexagon_vertices, normalize_batch, pixel_position, GridConfig, PixelPoint};

use thiserror::Error;

/// Errors raised while placing columns on the hexagonal grid.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// No coordinates were supplied, so no batch origin exists.
    #[error("cannot place an empty column batch")]
    EmptyBatch,

    /// A scale factor was zero or negative.
    #[error("invalid grid scale: hex_size={hex_size}, spacing_factor={spacing_factor}")]
    InvalidScale { hex_size: f64, spacing_factor: f64 },
}
