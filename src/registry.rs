//! Append-only tower storage and placement validation.
//!
//! A tower's identity is its index in insertion order. Nothing is ever
//! removed, so indices stay valid for the registry's lifetime.

use crate::error::*;
use crate::grid::*;
use crate::location::*;
use log::*;
use serde::{Deserialize, Serialize};

/// A placed relay tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tower {
    pub location: Location,
    pub range: u32,
}

impl Tower {
    #[inline]
    pub fn x(&self) -> usize {
        self.location.x()
    }

    #[inline]
    pub fn y(&self) -> usize {
        self.location.y()
    }

    #[inline]
    pub fn range_sq(&self) -> u64 {
        (self.range as u64) * (self.range as u64)
    }

    /// True when `(x, y)` lies within the tower's squared range.
    pub fn covers_xy(&self, x: usize, y: usize) -> bool {
        self.location.distance_sq_to_xy(x, y) <= self.range_sq()
    }
}

/// Serializes as its tower list. There is no `Deserialize`: a saved list is
/// loaded through [`TowerRegistry::restore`] so every tower is re-validated.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TowerRegistry {
    towers: Vec<Tower>,
}

impl TowerRegistry {
    pub fn new() -> Self {
        TowerRegistry { towers: Vec::new() }
    }

    /// Place a tower at `(x, y)`. Returns the new tower's index, or `None`
    /// when the cell is off the grid or obstructed. A rejected placement
    /// leaves the registry untouched.
    pub fn place(&mut self, grid: &Grid, x: usize, y: usize, range: u32) -> Option<usize> {
        if !grid.is_passable(x, y) {
            debug!(
                "Rejected tower at ({}, {}) range {}: cell is not buildable",
                x, y, range
            );
            return None;
        }

        let index = self.towers.len();
        self.towers.push(Tower {
            location: Location::from_coords(x, y),
            range,
        });

        Some(index)
    }

    /// Rebuild a registry from saved towers, placing each one in order. Fails
    /// on the first tower that `place` would reject, so indices never shift.
    pub fn restore<I: IntoIterator<Item = Tower>>(grid: &Grid, towers: I) -> Result<Self> {
        let mut registry = TowerRegistry::new();
        for (index, tower) in towers.into_iter().enumerate() {
            if registry.place(grid, tower.x(), tower.y(), tower.range).is_none() {
                return Err(RelayError::UnbuildableTower {
                    index,
                    x: tower.x(),
                    y: tower.y(),
                });
            }
        }
        Ok(registry)
    }

    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    pub fn get(&self, index: usize) -> Option<&Tower> {
        self.towers.get(index)
    }

    pub fn len(&self) -> usize {
        self.towers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towers.is_empty()
    }

    /// Number of towers whose range reaches `(x, y)`.
    pub fn coverage_count(&self, x: usize, y: usize) -> usize {
        self.towers.iter().filter(|t| t.covers_xy(x, y)).count()
    }

    /// Per-cell count of covering towers over the whole grid.
    pub fn coverage_map(&self, grid: &Grid) -> GridDataArray<u32> {
        let mut coverage = GridDataArray::for_grid(grid, 0u32);
        for tower in &self.towers {
            mark_coverage(grid, tower, |x, y| *coverage.get_mut(x, y) += 1);
        }
        coverage
    }

    /// Cells covered by the towers of a relay path. Indices that do not name
    /// a tower are ignored.
    pub fn path_coverage(&self, grid: &Grid, path: &[usize]) -> GridDataArray<bool> {
        let mut covered = GridDataArray::for_grid(grid, false);
        for tower in path.iter().filter_map(|&i| self.towers.get(i)) {
            mark_coverage(grid, tower, |x, y| covered.set(x, y, true));
        }
        covered
    }
}

/// Visit every in-grid cell a tower covers. Only the bounding square of the
/// range is scanned.
fn mark_coverage<F>(grid: &Grid, tower: &Tower, mut visit: F)
where
    F: FnMut(usize, usize),
{
    let range = tower.range as usize;
    let min_x = tower.x().saturating_sub(range);
    let max_x = tower.x().saturating_add(range).min(grid.rows() - 1);
    let min_y = tower.y().saturating_sub(range);
    let max_y = tower.y().saturating_add(range).min(grid.cols() - 1);

    for x in min_x..=max_x {
        for y in min_y..=max_y {
            if tower.covers_xy(x, y) {
                visit(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(rows: usize, cols: usize) -> Grid {
        Grid::new(&vec![vec![true; cols]; rows]).unwrap()
    }

    #[test]
    fn placement_succeeds_only_on_buildable_cells() {
        let grid = Grid::new(&[vec![true, false], vec![true, true]]).unwrap();
        let mut registry = TowerRegistry::new();

        for x in 0..4 {
            for y in 0..4 {
                let before = registry.len();
                let result = registry.place(&grid, x, y, 1);
                let expected = x < 2 && y < 2 && grid.is_passable(x, y);
                assert_eq!(result.is_some(), expected, "cell ({}, {})", x, y);
                if expected {
                    assert_eq!(result, Some(before));
                    assert_eq!(registry.len(), before + 1);
                } else {
                    assert_eq!(registry.len(), before);
                }
            }
        }
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn indices_follow_insertion_order() {
        let grid = open_grid(5, 5);
        let mut registry = TowerRegistry::new();
        assert_eq!(registry.place(&grid, 4, 4, 2), Some(0));
        assert_eq!(registry.place(&grid, 0, 0, 1), Some(1));

        let towers = registry.towers();
        assert_eq!((towers[0].x(), towers[0].y(), towers[0].range), (4, 4, 2));
        assert_eq!((towers[1].x(), towers[1].y(), towers[1].range), (0, 0, 1));
    }

    #[test]
    fn restore_round_trips_saved_towers() {
        let grid = open_grid(5, 5);
        let mut registry = TowerRegistry::new();
        registry.place(&grid, 1, 2, 3);
        registry.place(&grid, 4, 0, 1);

        #[derive(Deserialize)]
        struct Saved {
            towers: Vec<Tower>,
        }

        let saved: Saved = serde_json::from_str(&serde_json::to_string(&registry).unwrap()).unwrap();
        let restored = TowerRegistry::restore(&grid, saved.towers).unwrap();
        assert_eq!(restored.towers(), registry.towers());
    }

    #[test]
    fn restore_rejects_towers_place_would_reject() {
        let blocked = Grid::new(&[vec![false, false], vec![false, false]]).unwrap();
        let off_grid = Tower {
            location: Location::from_coords(1000, 0),
            range: 1,
        };
        let obstructed = Tower {
            location: Location::from_coords(0, 0),
            range: 1,
        };

        assert_eq!(
            TowerRegistry::restore(&blocked, [off_grid, obstructed]).unwrap_err(),
            RelayError::UnbuildableTower {
                index: 0,
                x: 1000,
                y: 0
            }
        );

        let open = open_grid(2, 2);
        assert_eq!(
            TowerRegistry::restore(&open, [obstructed, off_grid]).unwrap_err(),
            RelayError::UnbuildableTower {
                index: 1,
                x: 1000,
                y: 0
            }
        );
    }

    #[test]
    fn coverage_count_uses_squared_range() {
        let grid = open_grid(10, 10);
        let mut registry = TowerRegistry::new();
        registry.place(&grid, 5, 5, 2);
        registry.place(&grid, 5, 6, 0);

        assert_eq!(registry.coverage_count(5, 6), 2);
        assert_eq!(registry.coverage_count(7, 5), 1);
        // (6, 7) is at squared distance 5 from (5, 5), beyond 2^2.
        assert_eq!(registry.coverage_count(6, 7), 0);
        assert_eq!(registry.coverage_count(0, 0), 0);
    }

    #[test]
    fn coverage_map_matches_point_queries() {
        let grid = open_grid(6, 7);
        let mut registry = TowerRegistry::new();
        registry.place(&grid, 0, 0, 3);
        registry.place(&grid, 4, 5, 2);
        registry.place(&grid, 2, 3, 1);

        let map = registry.coverage_map(&grid);
        for ((x, y), &count) in map.iter() {
            assert_eq!(count as usize, registry.coverage_count(x, y));
        }
    }

    #[test]
    fn path_coverage_marks_only_path_towers() {
        let grid = open_grid(8, 8);
        let mut registry = TowerRegistry::new();
        registry.place(&grid, 0, 0, 1);
        registry.place(&grid, 7, 7, 1);

        let covered = registry.path_coverage(&grid, &[1, 9]);
        assert!(*covered.get(7, 7));
        assert!(*covered.get(6, 7));
        assert!(!*covered.get(6, 6));
        assert!(!*covered.get(0, 0));
    }
}
