//! ConnectivityGraph: which towers can relay to which.
//!
//! The graph is a snapshot of a registry. It does not track later
//! placements; rebuild it whenever the registry changes.

use crate::registry::*;
use fnv::FnvHashMap;
use log::*;

/// Undirected tower graph. Nodes are registry indices; edge weights are
/// squared Euclidean distances.
#[derive(Clone, Debug)]
pub struct ConnectivityGraph {
    node_count: usize,
    /// Keyed by `(low, high)` tower index.
    edges: FnvHashMap<(usize, usize), u64>,
    adjacency: Vec<Vec<(usize, u64)>>,
}

impl ConnectivityGraph {
    /// Build the graph from the registry's current towers.
    ///
    /// Every ordered pair `(i, j)` is tested against tower `i`'s range. A
    /// passing test writes the undirected edge `{i, j}`, replacing any weight
    /// already stored, so a pair is linked when either tower reaches the other.
    pub fn build(registry: &TowerRegistry) -> Self {
        let towers = registry.towers();
        let mut edges: FnvHashMap<(usize, usize), u64> = FnvHashMap::default();

        for (i, source) in towers.iter().enumerate() {
            for (j, target) in towers.iter().enumerate() {
                if i == j {
                    continue;
                }

                let distance = source.location.distance_sq_to(target.location);
                if distance <= source.range_sq() {
                    trace!("Edge {} -> {} (distance^2 {})", i, j, distance);
                    edges.insert(edge_key(i, j), distance);
                }
            }
        }

        let mut adjacency: Vec<Vec<(usize, u64)>> = vec![Vec::new(); towers.len()];
        for (&(a, b), &weight) in &edges {
            adjacency[a].push((b, weight));
            adjacency[b].push((a, weight));
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }

        ConnectivityGraph {
            node_count: towers.len(),
            edges,
            adjacency,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, index: usize) -> bool {
        index < self.node_count
    }

    /// Weight of the edge between `a` and `b`, in either order.
    pub fn edge_weight(&self, a: usize, b: usize) -> Option<u64> {
        self.edges.get(&edge_key(a, b)).copied()
    }

    /// Neighbors of `index` with edge weights, in ascending index order.
    pub fn neighbors(&self, index: usize) -> &[(usize, u64)] {
        self.adjacency
            .get(index)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All edges as `(low, high, weight)`, sorted.
    pub fn edges(&self) -> Vec<(usize, usize, u64)> {
        let mut edges: Vec<(usize, usize, u64)> =
            self.edges.iter().map(|(&(a, b), &w)| (a, b, w)).collect();
        edges.sort_unstable();
        edges
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn registry_with(towers: &[(usize, usize, u32)]) -> TowerRegistry {
        let grid = Grid::new(&vec![vec![true; 20]; 20]).unwrap();
        let mut registry = TowerRegistry::new();
        for &(x, y, range) in towers {
            registry.place(&grid, x, y, range).unwrap();
        }
        registry
    }

    #[test]
    fn out_of_range_towers_stay_disconnected() {
        let graph = ConnectivityGraph::build(&registry_with(&[(3, 4, 2), (7, 5, 3)]));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.neighbors(0).is_empty());
    }

    #[test]
    fn either_range_links_the_pair() {
        // Squared distance 16: tower 0 (range 4) reaches tower 1, not the
        // other way round.
        let graph = ConnectivityGraph::build(&registry_with(&[(0, 0, 4), (4, 0, 1)]));
        assert_eq!(graph.edge_weight(0, 1), Some(16));
        assert_eq!(graph.edge_weight(1, 0), Some(16));
        assert_eq!(graph.neighbors(1), &[(0, 16)]);
    }

    #[test]
    fn never_adds_self_loops() {
        let graph = ConnectivityGraph::build(&registry_with(&[(5, 5, 10)]));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edge_weight(0, 0), None);
    }

    #[test]
    fn rebuilding_an_unchanged_registry_is_idempotent() {
        let registry = registry_with(&[(0, 0, 3), (2, 2, 3), (4, 1, 2), (10, 10, 5), (12, 13, 1)]);
        let first = ConnectivityGraph::build(&registry);
        let second = ConnectivityGraph::build(&registry);
        assert_eq!(first.edges(), second.edges());
        assert!(first.edge_count() > 0);
    }

    #[test]
    fn neighbors_are_sorted() {
        let graph = ConnectivityGraph::build(&registry_with(&[(5, 5, 5), (5, 8, 0), (5, 6, 0), (7, 5, 0)]));
        let ids: Vec<usize> = graph.neighbors(0).iter().map(|&(n, _)| n).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(graph.neighbors(1).iter().all(|&(n, _)| n == 0));
        assert!(graph.neighbors(42).is_empty());
    }
}
