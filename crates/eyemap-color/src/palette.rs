//! Ordered discrete color palettes.

use crate::{Color, ColorError};

/// An ordered light-to-dark sequence of discrete colors, plus the
/// reserved no-data color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<Color>,
    no_data: Color,
}

impl ColorPalette {
    /// Build a palette from an ordered light-to-dark color sequence.
    pub fn new(colors: Vec<Color>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self {
            colors,
            no_data: Color::WHITE,
        })
    }

    /// Build a palette from hex strings.
    pub fn from_hex_strings<S: AsRef<str>>(hex: &[S]) -> Result<Self, ColorError> {
        let colors = hex
            .iter()
            .map(|h| Color::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of discrete colors (excluding the no-data color).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        false // construction guarantees at least one color
    }

    /// Color at a bucket index, clamped to the palette range.
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index.min(self.colors.len() - 1)]
    }

    /// The lightest (first) color.
    pub fn lightest(&self) -> Color {
        self.colors[0]
    }

    /// The darkest (last) color.
    pub fn darkest(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }

    /// The reserved color for absent values.
    pub fn no_data(&self) -> Color {
        self.no_data
    }

    /// All colors in order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for ColorPalette {
    /// Five-step light-to-dark red ramp used by the eyemaps.
    fn default() -> Self {
        Self {
            colors: vec![
                Color::new(0xfe, 0xe5, 0xd9),
                Color::new(0xfc, 0xae, 0x91),
                Color::new(0xfb, 0x6a, 0x4a),
                Color::new(0xde, 0x2d, 0x26),
                Color::new(0xa5, 0x0f, 0x15),
            ],
            no_data: Color::WHITE,
        }
    }
}
