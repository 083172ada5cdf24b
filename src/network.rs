//! Public API for relay planning.
//!
//! `RelayNetwork` owns a grid and the towers placed on it, and exposes
//! placement, optimization, and path queries in one place.

use crate::error::*;
use crate::graph::ConnectivityGraph;
use crate::grid::{Grid, GridDataArray};
use crate::optimizer::{OptimizationReport, PlacementOptimizer};
use crate::path::{shortest_path, RelayPath};
use crate::registry::{Tower, TowerRegistry};

#[derive(Clone, Debug)]
pub struct RelayNetwork {
    grid: Grid,
    registry: TowerRegistry,
}

impl RelayNetwork {
    pub fn new(grid: Grid) -> Self {
        RelayNetwork {
            grid,
            registry: TowerRegistry::new(),
        }
    }

    /// Build the grid from a boolean matrix (`true` = buildable).
    pub fn from_matrix<R: AsRef<[bool]>>(passable: &[R]) -> Result<Self> {
        Grid::new(passable).map(Self::new)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &TowerRegistry {
        &self.registry
    }

    pub fn towers(&self) -> &[Tower] {
        self.registry.towers()
    }

    /// Place a tower; `None` means the placement was rejected.
    pub fn place(&mut self, x: usize, y: usize, range: u32) -> Option<usize> {
        self.registry.place(&self.grid, x, y, range)
    }

    pub fn optimize(&mut self, optimizer: &PlacementOptimizer) -> OptimizationReport {
        optimizer.optimize(&self.grid, &mut self.registry)
    }

    pub fn build_graph(&self) -> ConnectivityGraph {
        ConnectivityGraph::build(&self.registry)
    }

    /// Shortest relay path over a graph built from the current towers.
    pub fn find_reliable_path(&self, start: usize, end: usize) -> Option<RelayPath> {
        shortest_path(&self.build_graph(), start, end)
    }

    pub fn coverage_map(&self) -> GridDataArray<u32> {
        self.registry.coverage_map(&self.grid)
    }

    pub fn path_coverage(&self, path: &RelayPath) -> GridDataArray<bool> {
        self.registry.path_coverage(&self.grid, &path.towers)
    }
}
