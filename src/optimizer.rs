//! PlacementOptimizer: greedy, budgeted tower placement.
//!
//! Tower types are processed in the order they were added. Each type gets the
//! full budget and repeatedly claims the first buildable cell (row-major) that
//! no existing tower covers, until the budget runs out or no uncovered cell
//! remains. There is no backtracking: earlier placements are never revisited.

use crate::constants::*;
use crate::grid::*;
use crate::location::*;
use crate::registry::*;
use log::*;
use serde::{Deserialize, Serialize};

/// A kind of tower the optimizer may build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerType {
    pub range: u32,
    /// Planner-assigned desirability. Only types scoring above zero are ever
    /// placed.
    #[serde(rename = "coverage")]
    pub coverage_score: f64,
    pub cost: f64,
}

impl TowerType {
    pub fn new(range: u32, coverage_score: f64, cost: f64) -> Self {
        TowerType {
            range,
            coverage_score,
            cost,
        }
    }
}

/// What the optimizer did for one tower type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeOutcome {
    /// Registry indices of the towers placed for this type, in placement order.
    pub placed: Vec<usize>,
    pub spent: f64,
}

/// Outcome per tower type, in the order the types were processed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptimizationReport {
    pub per_type: Vec<TypeOutcome>,
}

impl OptimizationReport {
    pub fn total_placed(&self) -> usize {
        self.per_type.iter().map(|o| o.placed.len()).sum()
    }

    /// All placed tower indices, in placement order.
    pub fn placed(&self) -> impl Iterator<Item = usize> + '_ {
        self.per_type.iter().flat_map(|o| o.placed.iter().copied())
    }
}

/// Append-only builder holding the budget and ordered tower types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementOptimizer {
    budget: f64,
    tower_types: Vec<TowerType>,
}

impl PlacementOptimizer {
    /// Start with the given per-type budget and no tower types.
    pub fn new(budget: f64) -> Self {
        PlacementOptimizer {
            budget,
            tower_types: Vec::new(),
        }
    }

    /// Append a tower type to the end of the processing order.
    pub fn add_tower_type(mut self, tower_type: TowerType) -> Self {
        self.tower_types.push(tower_type);
        self
    }

    pub fn tower_types<I: IntoIterator<Item = TowerType>>(mut self, tower_types: I) -> Self {
        self.tower_types.extend(tower_types);
        self
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn types(&self) -> &[TowerType] {
        &self.tower_types
    }

    /// Greedily add towers to `registry`.
    pub fn optimize(&self, grid: &Grid, registry: &mut TowerRegistry) -> OptimizationReport {
        let mut report = OptimizationReport::default();

        for (type_index, tower_type) in self.tower_types.iter().enumerate() {
            let mut outcome = TypeOutcome::default();
            let mut remaining_budget = self.budget;

            while remaining_budget >= tower_type.cost {
                let best_pos = match find_uncovered_cell(grid, registry, tower_type) {
                    Some(pos) => pos,
                    None => break,
                };

                match registry.place(grid, best_pos.x(), best_pos.y(), tower_type.range) {
                    Some(index) => {
                        trace!(
                            "Type {} placed tower {} at ({}, {})",
                            type_index,
                            index,
                            best_pos.x(),
                            best_pos.y()
                        );
                        outcome.placed.push(index);
                        outcome.spent += tower_type.cost;
                        remaining_budget -= tower_type.cost;
                    }
                    // Candidates come from passable cells, so this only
                    // guards against an inconsistent grid/registry pairing.
                    None => break,
                }
            }

            debug!(
                "Type {} (range {}): placed {} towers, spent {} of {}",
                type_index,
                tower_type.range,
                outcome.placed.len(),
                outcome.spent,
                self.budget
            );

            report.per_type.push(outcome);
        }

        report
    }
}

/// Row-major scan for a buildable cell with zero coverage.
///
/// A cell is claimed only when the type's score beats the best seen so far.
/// That starts at zero and every candidate of one type scores the same, so
/// the first uncovered cell wins and a non-positive score never wins.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn find_uncovered_cell(
    grid: &Grid,
    registry: &TowerRegistry,
    tower_type: &TowerType,
) -> Option<Location> {
    // Negated `>` so a NaN score never qualifies.
    if !(tower_type.coverage_score > INITIAL_BEST_COVERAGE) {
        return None;
    }

    grid.passable_cells()
        .find(|loc| registry.coverage_count(loc.x(), loc.y()) == 0)
}
