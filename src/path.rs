//! Shortest relay path between two towers.

use crate::graph::*;
use log::*;
use pathfinding::directed::dijkstra::dijkstra;
use serde::{Deserialize, Serialize};

/// A multi-hop relay route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayPath {
    /// Tower indices from start to end, inclusive.
    pub towers: Vec<usize>,
    /// Sum of squared-distance edge weights along the route.
    pub cost: u64,
}

impl RelayPath {
    pub fn hops(&self) -> usize {
        self.towers.len().saturating_sub(1)
    }
}

/// Minimum-weight path from `start` to `end`. Returns `None` when either
/// index is not a tower in the graph or the two are disconnected. A path from
/// a tower to itself is just `[start]` with zero cost.
pub fn shortest_path(graph: &ConnectivityGraph, start: usize, end: usize) -> Option<RelayPath> {
    if !graph.contains_node(start) || !graph.contains_node(end) {
        debug!(
            "No path {} -> {}: graph has only {} towers",
            start,
            end,
            graph.node_count()
        );
        return None;
    }

    let result = dijkstra(
        &start,
        |&node| graph.neighbors(node).iter().copied(),
        |&node| node == end,
    );

    match result {
        Some((towers, cost)) => Some(RelayPath { towers, cost }),
        None => {
            debug!("No path {} -> {}: towers are disconnected", start, end);
            None
        }
    }
}
