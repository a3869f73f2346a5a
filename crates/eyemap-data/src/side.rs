//! Soma side resolution.
//!
//! External data spells hemispheres many ways ("L", "left", "Right",
//! "bilateral", "center", "*"). All of them resolve to [`SomaSide`] at
//! the ingestion boundary; the pipeline itself only ever sees the
//! canonical variants and their single-letter codes.

use serde::{Deserialize, Serialize};

use crate::{DataError, Result};

/// Where a neuron's cell body sits, or which bodies a query selects.
///
/// `Left`/`Right`/`Middle` are the storable canonical sides (codes
/// 'L'/'R'/'M'). `Combined` and `All` are selector variants for
/// queries and display: they are derived at display time from the
/// presence of multiple canonical sides and are never stored on a
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SomaSide {
    Left,
    Right,
    Middle,
    Combined,
    All,
}

impl SomaSide {
    /// Resolve a flexible external spelling.
    ///
    /// Accepts single letters, full words, "bilateral"/"both",
    /// "center", and "*", case-insensitively. This is the only place
    /// free-form side strings are interpreted.
    pub fn parse(spelling: &str) -> Result<Self> {
        match spelling.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "r" | "right" => Ok(Self::Right),
            "m" | "middle" | "center" => Ok(Self::Middle),
            "combined" | "bilateral" | "both" => Ok(Self::Combined),
            "all" | "*" => Ok(Self::All),
            _ => Err(DataError::UnknownSideSpelling(spelling.to_string())),
        }
    }

    /// The canonical single-letter code, for the storable sides.
    pub const fn canonical_code(&self) -> Option<char> {
        match self {
            Self::Left => Some('L'),
            Self::Right => Some('R'),
            Self::Middle => Some('M'),
            Self::Combined | Self::All => None,
        }
    }

    /// Look up a storable side from its canonical code.
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'L' => Ok(Self::Left),
            'R' => Ok(Self::Right),
            'M' => Ok(Self::Middle),
            other => Err(DataError::UnknownSideCode(other)),
        }
    }

    /// Whether this variant may be stored on a column.
    pub const fn is_canonical(&self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Middle)
    }

    /// The canonical codes this variant selects when grouping.
    pub fn selected_codes(&self) -> &'static [char] {
        match self {
            Self::Left => &['L'],
            Self::Right => &['R'],
            Self::Middle => &['M'],
            Self::Combined => &['L', 'R'],
            Self::All => &['L', 'R', 'M'],
        }
    }
}

impl std::fmt::Display for SomaSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::Middle => "M",
            Self::Combined => "combined",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_flexible_spellings() {
        for (spelling, expected) in [
            ("L", SomaSide::Left),
            ("left", SomaSide::Left),
            ("LEFT", SomaSide::Left),
            ("r", SomaSide::Right),
            ("Right", SomaSide::Right),
            ("m", SomaSide::Middle),
            ("center", SomaSide::Middle),
            ("bilateral", SomaSide::Combined),
            ("both", SomaSide::Combined),
            ("*", SomaSide::All),
            ("all", SomaSide::All),
        ] {
            assert_eq!(SomaSide::parse(spelling).unwrap(), expected, "{spelling}");
        }
    }

    #[test]
    fn rejects_unknown_spelling() {
        assert!(matches!(
            SomaSide::parse("upward"),
            Err(DataError::UnknownSideSpelling(_))
        ));
    }

    #[test]
    fn canonical_codes() {
        assert_eq!(SomaSide::Left.canonical_code(), Some('L'));
        assert_eq!(SomaSide::Right.canonical_code(), Some('R'));
        assert_eq!(SomaSide::Middle.canonical_code(), Some('M'));
        assert_eq!(SomaSide::Combined.canonical_code(), None);
        assert_eq!(SomaSide::All.canonical_code(), None);
    }

    #[test]
    fn code_round_trip() {
        for code in ['L', 'R', 'M'] {
            assert_eq!(
                SomaSide::from_code(code).unwrap().canonical_code(),
                Some(code)
            );
        }
        assert_eq!(
            SomaSide::from_code('x'),
            Err(DataError::UnknownSideCode('x'))
        );
    }

    #[test]
    fn combined_selects_both_hemispheres() {
        assert_eq!(SomaSide::Combined.selected_codes(), &['L', 'R']);
        assert_eq!(SomaSide::All.selected_codes(), &['L', 'R', 'M']);
    }
}
