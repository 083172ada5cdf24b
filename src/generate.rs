//! Seeded random obstruction matrices.
//!
//! Grid construction never generates randomness itself; callers that want a
//! random city layout produce the matrix here and hand it to [`Grid::new`].

use crate::error::*;
use crate::grid::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A `rows x cols` matrix where each cell is buildable iff a uniform sample
/// from `[0, 1)` exceeds `obstructed_probability`. The same seed always
/// yields the same matrix.
pub fn obstruction_matrix(
    rows: usize,
    cols: usize,
    obstructed_probability: f64,
    seed: u64,
) -> Vec<Vec<bool>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| rng.gen::<f64>() > obstructed_probability)
                .collect()
        })
        .collect()
}

pub fn random_grid(
    rows: usize,
    cols: usize,
    obstructed_probability: f64,
    seed: u64,
) -> Result<Grid> {
    Grid::new(&obstruction_matrix(rows, cols, obstructed_probability, seed))
}
