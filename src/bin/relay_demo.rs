//! Replays the reference scenario: a random 10x10 city, two hand-placed
//! towers, one optimizer pass, then a path query between the first two towers.
//!
//! Usage: `relay-demo [seed]`

use log::*;
use relay_planner::constants::DEFAULT_OBSTRUCTED_PROBABILITY;
use relay_planner::generate::random_grid;
use relay_planner::{PlacementOptimizer, RelayNetwork, TowerType};

const DEFAULT_SEED: u64 = 42;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let grid = match random_grid(10, 10, DEFAULT_OBSTRUCTED_PROBABILITY, seed) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    info!(
        "Generated {}x{} grid with {} buildable cells (seed {})",
        grid.rows(),
        grid.cols(),
        grid.passable_count(),
        seed
    );

    let mut network = RelayNetwork::new(grid);
    for &(x, y, range) in &[(3, 4, 2), (7, 5, 3)] {
        if network.place(x, y, range).is_none() {
            warn!("Cell ({}, {}) is obstructed, tower not placed", x, y);
        }
    }

    let optimizer = PlacementOptimizer::new(1000.0)
        .add_tower_type(TowerType::new(2, 10.0, 200.0))
        .add_tower_type(TowerType::new(3, 15.0, 300.0));
    let report = network.optimize(&optimizer);
    info!("Optimizer placed {} towers", report.total_placed());

    for (index, tower) in network.towers().iter().enumerate() {
        println!(
            "tower {}: ({}, {}) range {}",
            index,
            tower.x(),
            tower.y(),
            tower.range
        );
    }

    match network.find_reliable_path(0, 1) {
        Some(path) => println!(
            "Reliable path: {:?} (cost {}, {} hops)",
            path.towers,
            path.cost,
            path.hops()
        ),
        None => println!("No reliable path found."),
    }
}
