//! Eyemap Grid Rendering
//!
//! Turns processed columns into visually comparable hexagonal-grid
//! images: one SVG string or base64 PNG data URI per region and metric.
//!
//! Every hexagon element carries its coordinate, region, and side plus
//! a `layer-colors` attribute (a JSON array of per-layer color strings)
//! and, when per-layer thresholds were computed, a
//! `data-layer-thresholds` attribute. These names and value shapes are
//! the compatibility contract with the interactive front-end.
//!
//! The full region × metric sweep is embarrassingly parallel: every
//! render reads only the immutable, pre-built [`MinMaxData`] context,
//! so combinations fan out across a rayon pool and one combination's
//! failure never aborts its siblings.
//!
//! [`MinMaxData`]: eyemap_stats::MinMaxData

mod error;
mod png;
mod renderer;
mod svg;
mod transform;

pub use error::RenderError;
pub use renderer::{GridRenderer, OutputFormat, RegionSummary, RenderReport};
pub use transform::{CoordinateTransform, Layout, PlacedColumn};
