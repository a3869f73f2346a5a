//! Error types for rendering.

use thiserror::Error;

/// Errors from placing or rendering one region/metric combination.
///
/// Failures are isolated per combination: the sweep records the error
/// and continues with the siblings.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Columns could not be placed on the grid.
    #[error("geometry error: {0}")]
    Geometry(#[from] eyemap_geometry::GeometryError),

    /// A region had no columns at all, not even placeholders.
    #[error("region {0:?} has no columns to render")]
    EmptyRegion(String),

    /// No normalization range was available for a region; the shared
    /// min/max context must be fully built before rendering starts.
    #[error("no min/max range for region {region:?} and metric {metric}")]
    MissingRange {
        region: String,
        metric: eyemap_stats::MetricType,
    },

    /// PNG rasterization or encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncoding(#[from] image::ImageError),

    /// String formatting failed while assembling SVG markup.
    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Serializing an attribute payload failed.
    #[error("attribute serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
