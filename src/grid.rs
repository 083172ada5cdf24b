use crate::constants::*;
use crate::error::*;
use crate::location::*;
use bitflags::*;
use itertools::iproduct;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        const NONE = 0;
        const OBSTRUCTED = 1;
    }
}

/// Immutable obstruction map. Cells are stored row-major: `x` selects the
/// row, `y` the column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    buffer: Vec<u8>,
}

impl Grid {
    /// Build a grid from a caller-supplied matrix where `true` marks a
    /// buildable cell. The matrix must be non-empty and rectangular.
    pub fn new<R: AsRef<[bool]>>(passable: &[R]) -> Result<Grid> {
        let rows = passable.len();
        let cols = passable.first().map(|row| row.as_ref().len()).unwrap_or(0);

        if rows == 0 || cols == 0 {
            return Err(RelayError::InvalidGrid(format!(
                "grid must have at least one row and column, got {}x{}",
                rows, cols
            )));
        }

        if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
            return Err(RelayError::InvalidGrid(format!(
                "{}x{} exceeds the maximum extent of {}",
                rows, cols, MAX_GRID_DIMENSION
            )));
        }

        let mut buffer = Vec::with_capacity(rows * cols);
        for (x, row) in passable.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(RelayError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    x,
                    row.len(),
                    cols
                )));
            }
            buffer.extend(row.iter().map(|&open| {
                if open {
                    CellFlags::NONE.bits()
                } else {
                    CellFlags::OBSTRUCTED.bits()
                }
            }));
        }

        Ok(Grid { rows, cols, buffer })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.rows && y < self.cols
    }

    pub fn get_xy(&self, x: usize, y: usize) -> Result<CellFlags> {
        if !self.in_bounds(x, y) {
            return Err(RelayError::OutOfBounds {
                x,
                y,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(CellFlags::from_bits_truncate(self.buffer[x * self.cols + y]))
    }

    /// Bounds-checked passability query.
    pub fn passable(&self, x: usize, y: usize) -> Result<bool> {
        self.get_xy(x, y)
            .map(|flags| !flags.contains(CellFlags::OBSTRUCTED))
    }

    /// Passability query that treats anything off the grid as blocked.
    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.passable(x, y).unwrap_or(false)
    }

    /// All cell coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Location> {
        iproduct!(0..self.rows, 0..self.cols).map(|(x, y)| Location::from_coords(x, y))
    }

    /// Buildable cell coordinates in row-major order.
    pub fn passable_cells(&self) -> impl Iterator<Item = Location> + '_ {
        self.cells().filter(|loc| self.is_passable(loc.x(), loc.y()))
    }

    pub fn passable_count(&self) -> usize {
        self.buffer
            .iter()
            .filter(|&&bits| !CellFlags::from_bits_truncate(bits).contains(CellFlags::OBSTRUCTED))
            .count()
    }
}

/// Per-cell data laid out to match a [`Grid`].
#[derive(Clone, Debug, PartialEq)]
pub struct GridDataArray<T: Copy> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy> GridDataArray<T> {
    pub fn new(rows: usize, cols: usize, initial: T) -> Self {
        GridDataArray {
            rows,
            cols,
            data: vec![initial; rows * cols],
        }
    }

    pub fn for_grid(grid: &Grid, initial: T) -> Self {
        Self::new(grid.rows(), grid.cols(), initial)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(y < self.cols, "column {} out of {}", y, self.cols);
        &self.data[x * self.cols + y]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        debug_assert!(y < self.cols, "column {} out of {}", y, self.cols);
        let index = x * self.cols + y;
        &mut self.data[index]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        *self.get_mut(x, y) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i / cols, i % cols), v))
    }
}

impl<T: Copy + Serialize> Serialize for GridDataArray<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (self.rows, self.cols, &self.data).serialize(serializer)
    }
}

impl<'de, T: Copy + Deserialize<'de>> Deserialize<'de> for GridDataArray<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (rows, cols, data) = <(usize, usize, Vec<T>)>::deserialize(deserializer)?;
        match rows.checked_mul(cols) {
            Some(len) if len == data.len() => {}
            _ => return Err(serde::de::Error::custom("Invalid grid data array size")),
        }
        Ok(GridDataArray { rows, cols, data })
    }
}
