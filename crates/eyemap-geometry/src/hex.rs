//! Column addresses and axial hexagonal coordinates.
//!
//! Axial coordinates use two axes (q, r) at 60 degrees, with an implicit
//! third axis s = -q - r. The native offset address used by the anatomy
//! data is converted to axial form with a fixed affine map so that
//! neighboring columns in the offset lattice are neighboring hexagons.

use std::ops::{Add, Sub};

/// Native offset address of one column: two integer axes as assigned by
/// the reconstruction. Unique within a region+side group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnCoordinate {
    /// First native axis
    pub hex1: i64,
    /// Second native axis
    pub hex2: i64,
}

impl ColumnCoordinate {
    /// Create a new native address.
    pub const fn new(hex1: i64, hex2: i64) -> Self {
        Self { hex1, hex2 }
    }

    /// Convert to axial coordinates.
    ///
    /// The map is `q = -(hex1 - hex2) - 3`, `r = -hex2`. The constant
    /// offset keeps the rendered lattice orientation consistent with the
    /// historical eyemap layout; callers normalize the batch origin
    /// before conversion, so only relative positions matter.
    pub const fn to_axial(self) -> AxialCoord {
        AxialCoord {
            q: -(self.hex1 - self.hex2) - 3,
            r: -self.hex2,
        }
    }
}

impl Add for ColumnCoordinate {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            hex1: self.hex1 + other.hex1,
            hex2: self.hex2 + other.hex2,
        }
    }
}

impl Sub for ColumnCoordinate {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            hex1: self.hex1 - other.hex1,
            hex2: self.hex2 - other.hex2,
        }
    }
}

impl std::fmt::Display for ColumnCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.hex1, self.hex2)
    }
}

/// A position in axial hexagonal space.
///
/// The implicit third axis is s = -q - r.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxialCoord {
    /// First axial coordinate
    pub q: i64,
    /// Second axial coordinate
    pub r: i64,
}

impl AxialCoord {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// Create a new axial coordinate.
    pub const fn new(q: i64, r: i64) -> Self {
        Self { q, r }
    }

    /// Compute the implicit third axis: s = -q - r.
    pub const fn s(&self) -> i64 {
        -self.q - self.r
    }

    /// Hexagonal distance between two coordinates.
    ///
    /// max(|dq|, |dr|, |ds|) where ds = -dq - dr
    pub fn hex_distance(&self, other: &Self) -> u64 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = ((self.q - other.q) + (self.r - other.r)).unsigned_abs();
        dq.max(dr).max(ds)
    }

    /// The six neighbor directions.
    pub const DIRECTIONS: [Self; 6] = [
        Self { q: 1, r: 0 },
        Self { q: 1, r: -1 },
        Self { q: 0, r: -1 },
        Self { q: -1, r: 0 },
        Self { q: -1, r: 1 },
        Self { q: 0, r: 1 },
    ];

    /// Get all six neighbors.
    pub fn neighbors(&self) -> [Self; 6] {
        Self::DIRECTIONS.map(|d| *self + d)
    }
}

impl Add for AxialCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            q: self.q + other.q,
            r: self.r + other.r,
        }
    }
}

impl Sub for AxialCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            q: self.q - other.q,
            r: self.r - other.r,
        }
    }
}

impl std::fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
