pub mod constants;
pub mod error;
pub mod generate;
pub mod graph;
pub mod grid;
pub mod location;
pub mod network;
pub mod optimizer;
pub mod path;
pub mod registry;

pub use error::{RelayError, Result};
pub use graph::ConnectivityGraph;
pub use grid::{CellFlags, Grid, GridDataArray};
pub use location::Location;
pub use network::RelayNetwork;
pub use optimizer::{OptimizationReport, PlacementOptimizer, TowerType, TypeOutcome};
pub use path::{shortest_path, RelayPath};
pub use registry::{Tower, TowerRegistry};
