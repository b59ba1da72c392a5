//! Independent shortest path runs sharing one read-only graph.

use rayon::prelude::*;

use crate::algorithm::engine::ShortestPathEngine;
use crate::algorithm::ShortestPathResult;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Runs one engine per source in parallel. Results come back in the order of `sources`.
pub fn from_sources<W, G>(graph: &G, sources: &[usize]) -> Vec<Result<ShortestPathResult<W>>>
where
    W: Weight,
    G: Graph<W> + Sync,
{
    sources
        .par_iter()
        .map(|&source| {
            let mut engine = ShortestPathEngine::new(graph);
            engine.compute(source)?;
            engine.into_result()
        })
        .collect()
}

/// All-pairs distances, row `s` holding the distances from vertex `s`
pub fn distance_matrix<W, G>(graph: &G) -> Vec<Vec<Option<W>>>
where
    W: Weight,
    G: Graph<W> + Sync,
{
    (0..graph.node_count())
        .into_par_iter()
        .map(|source| {
            let mut engine = ShortestPathEngine::new(graph);
            match engine.compute(source) {
                Ok(result) => result.distances.clone(),
                Err(_) => Vec::new(),
            }
        })
        .collect()
}
