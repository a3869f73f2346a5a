//! Eyemap Color Mapping
//!
//! Maps normalized metric values onto an ordered light-to-dark sequence
//! of discrete colors. The mapping is deliberately lenient: a missing or
//! non-finite value becomes the reserved no-data color (white) instead
//! of aborting the batch, so one bad column never blanks a whole region.
//!
//! A degenerate range (min == max) is a defined single-color result,
//! not an error: every value normalizes to 0 and maps to the lightest
//! bucket.

mod color;
mod mapper;
mod palette;

pub use color::Color;
pub use mapper::ColorMapper;
pub use palette::ColorPalette;

use thiserror::Error;

/// Errors from palette construction and color parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// A hex color string contained a non-hexadecimal digit.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// A hex color string was not 6 digits (plus optional '#').
    #[error("hex color must be 6 digits, got {0:?}")]
    InvalidLength(String),

    /// A palette needs at least one color.
    #[error("palette must contain at least one color")]
    EmptyPalette,
}
