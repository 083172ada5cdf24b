/// Largest supported grid extent along either axis. Coordinates are packed
/// into 16 bits each by [`Location`](crate::location::Location).
pub const MAX_GRID_DIMENSION: usize = 1 << 16;

/// Probability that a generated cell is obstructed when the caller does not
/// supply one.
pub const DEFAULT_OBSTRUCTED_PROBABILITY: f64 = 0.3;

/// Selection threshold the optimizer starts from. A tower type must score
/// strictly above this to claim any cell.
pub const INITIAL_BEST_COVERAGE: f64 = 0.0;
