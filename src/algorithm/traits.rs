use serde::Serialize;

use crate::graph::{Graph, Weight};
use crate::{Error, Result};

/// Counters collected while running the relaxation loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Entries popped from the frontier, stale ones included
    pub pops: usize,
    /// Popped entries discarded because they were superseded
    pub stale_pops: usize,
    /// Successful relaxations (each one pushes a frontier entry)
    pub relaxations: usize,
}

/// A reconstructed shortest path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path<W> {
    /// Vertices from the source to the target, both included
    pub nodes: Vec<usize>,
    /// Total weight of the path
    pub distance: W,
}

impl<W> Path<W> {
    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Consecutive vertex pairs along the path
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathResult<W>
where
    W: Weight,
{
    /// Source vertex ID
    pub source: usize,

    /// Distances from source to each vertex, `None` standing for infinity
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Finalized flags
    pub visited: Vec<bool>,

    /// Vertices in the order they were finalized
    pub settle_order: Vec<usize>,

    pub stats: SearchStats,
}

impl<W> ShortestPathResult<W>
where
    W: Weight,
{
    /// Number of vertices the result covers
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Shortest distance to `node`, `None` if it is unreachable
    pub fn distance_to(&self, node: usize) -> Result<Option<W>> {
        self.distances
            .get(node)
            .copied()
            .ok_or(Error::InvalidNode(node))
    }

    pub fn is_reachable(&self, node: usize) -> bool {
        matches!(self.distances.get(node), Some(Some(_)))
    }

    /// Number of vertices with a finite distance, the source included
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Reconstructs the shortest path from the source to `node`.
    ///
    /// Returns `Ok(None)` when `node` is unreachable. The predecessor chain always
    /// terminates at the source: a predecessor is finalized strictly before the
    /// vertex it was relaxed into.
    pub fn path_to(&self, node: usize) -> Result<Option<Path<W>>> {
        let distance = match self.distance_to(node)? {
            Some(d) => d,
            None => return Ok(None),
        };

        let mut nodes = vec![node];
        let mut current = node;
        while let Some(pred) = self.predecessors[current] {
            nodes.push(pred);
            current = pred;
        }
        nodes.reverse();

        debug_assert_eq!(nodes.first(), Some(&self.source));
        Ok(Some(Path { nodes, distance }))
    }
}

/// Trait for single-source shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        result
            .path_to(target)
            .ok()
            .flatten()
            .map(|path| path.nodes)
    }
}
