use crate::constants::MAX_GRID_DIMENSION;
use serde::*;

/// A grid cell coordinate. `x` indexes rows and `y` indexes columns.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Location {
    packed: u32,
}

impl Location {
    /// Both coordinates must be below `MAX_GRID_DIMENSION`; `Grid` enforces
    /// this before handing out locations.
    pub fn from_coords(x: usize, y: usize) -> Self {
        debug_assert!(
            x < MAX_GRID_DIMENSION && y < MAX_GRID_DIMENSION,
            "({}, {}) exceeds the packed coordinate range",
            x,
            y
        );
        Location {
            packed: ((x as u32) << 16) | (y as u32 & 0xFFFF),
        }
    }

    #[inline]
    pub fn x(self) -> usize {
        ((self.packed >> 16) & 0xFFFF) as usize
    }

    #[inline]
    pub fn y(self) -> usize {
        (self.packed & 0xFFFF) as usize
    }

    #[inline]
    pub fn packed_repr(self) -> u32 {
        self.packed
    }

    #[inline]
    pub fn from_packed(packed: u32) -> Self {
        Location { packed }
    }

    /// Squared Euclidean distance between two cells.
    pub fn distance_sq_to(self, other: Self) -> u64 {
        self.distance_sq_to_xy(other.x(), other.y())
    }

    pub fn distance_sq_to_xy(self, x: usize, y: usize) -> u64 {
        let dx = self.x().abs_diff(x) as u64;
        let dy = self.y().abs_diff(y) as u64;

        dx * dx + dy * dy
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.packed_repr().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Location::from_packed)
    }
}
