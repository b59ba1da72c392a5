use std::ops::ControlFlow;

use log::{debug, trace};

use crate::algorithm::observer::{NoopObserver, StepObserver, StepView};
use crate::algorithm::{SearchStats, ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::Frontier;
use crate::graph::{Graph, Weight};
use crate::{Error, Result};

/// How a relaxation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The frontier ran empty; every reachable vertex is finalized
    Exhausted,
    /// The observer asked to stop; finalized distances are exact, the rest are upper bounds
    Aborted,
}

/// Classic Dijkstra's algorithm with a lazily pruned frontier
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Runs the relaxation loop from `source`, reporting every finalization to `observer`.
    ///
    /// Duplicate frontier entries for one vertex are allowed. A popped entry is dropped
    /// when its vertex is already finalized or when its distance no longer matches the
    /// recorded one; both checks are required for correctness on graphs where a vertex
    /// is improved more than once.
    pub fn run<W, G, O>(
        &self,
        graph: &G,
        source: usize,
        observer: &mut O,
    ) -> Result<(ShortestPathResult<W>, Termination)>
    where
        W: Weight,
        G: Graph<W> + ?Sized,
        O: StepObserver<W> + ?Sized,
    {
        if !graph.has_node(source) {
            return Err(Error::InvalidSource(source));
        }

        let n = graph.node_count();
        debug!("Dijkstra from vertex {} over {} vertices", source, n);

        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut settle_order = Vec::new();
        let mut stats = SearchStats::default();

        distances[source] = Some(W::zero());

        let mut frontier = Frontier::new();
        frontier.push(source, W::zero());

        let initial = StepView {
            step: 0,
            source,
            current: None,
            distances: &distances,
            visited: &visited,
            predecessors: &predecessors,
            frontier_len: frontier.len(),
        };
        let mut termination = match observer.on_step(&initial) {
            ControlFlow::Continue(()) => Termination::Exhausted,
            ControlFlow::Break(()) => Termination::Aborted,
        };

        while termination == Termination::Exhausted {
            let Some((u, dist_u)) = frontier.pop() else {
                break;
            };
            stats.pops += 1;

            // Stale entries: u was finalized already, or a cheaper entry superseded this one
            if visited[u] || distances[u] != Some(dist_u) {
                stats.stale_pops += 1;
                continue;
            }

            visited[u] = true;
            settle_order.push(u);

            for (v, weight) in graph.neighbors(u) {
                // A sum past the range of W never improves a distance
                let Some(new_dist) = dist_u.checked_sum(weight) else {
                    trace!("relax {} -> {}: overflow, skipped", u, v);
                    continue;
                };

                let should_update = match distances[v] {
                    None => true,
                    Some(current_dist) => new_dist < current_dist,
                };

                if should_update {
                    trace!("relax {} -> {}: {:?}", u, v, new_dist);
                    distances[v] = Some(new_dist);
                    predecessors[v] = Some(u);
                    frontier.push(v, new_dist);
                    stats.relaxations += 1;
                }
            }

            let view = StepView {
                step: settle_order.len(),
                source,
                current: Some(u),
                distances: &distances,
                visited: &visited,
                predecessors: &predecessors,
                frontier_len: frontier.len(),
            };
            if observer.on_step(&view).is_break() {
                termination = Termination::Aborted;
            }
        }

        debug!(
            "Dijkstra from {} {:?}: {} finalized, {} pops ({} stale), {} relaxations",
            source,
            termination,
            settle_order.len(),
            stats.pops,
            stats.stale_pops,
            stats.relaxations
        );

        Ok((
            ShortestPathResult {
                source,
                distances,
                predecessors,
                visited,
                settle_order,
                stats,
            },
            termination,
        ))
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Weight,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        let (result, _) = self.run(graph, source, &mut NoopObserver)?;
        Ok(result)
    }
}

