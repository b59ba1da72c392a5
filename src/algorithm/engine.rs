use log::debug;

use crate::algorithm::dijkstra::{Dijkstra, Termination};
use crate::algorithm::observer::{NoopObserver, StepObserver};
use crate::algorithm::{Path, ShortestPathResult};
use crate::graph::{Graph, Weight};
use crate::{Error, Result};

/// Lifecycle of a [`ShortestPathEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// No computation has run yet
    Ready,
    /// Inside `compute`
    Running,
    /// Distances and predecessors are frozen and can be queried
    Completed,
    /// The last run was stopped by its observer
    Aborted,
}

/// Stateful single-source shortest path engine over a borrowed graph
///
/// The graph is only read, so any number of engines can share one graph, including
/// across threads. Each `compute` call starts from scratch; nothing carries over
/// from a previous run.
#[derive(Debug)]
pub struct ShortestPathEngine<'g, W, G>
where
    W: Weight,
    G: Graph<W> + ?Sized,
{
    graph: &'g G,
    algorithm: Dijkstra,
    status: EngineStatus,
    result: Option<ShortestPathResult<W>>,
}

impl<'g, W, G> ShortestPathEngine<'g, W, G>
where
    W: Weight,
    G: Graph<W> + ?Sized,
{
    pub fn new(graph: &'g G) -> Self {
        ShortestPathEngine {
            graph,
            algorithm: Dijkstra::new(),
            status: EngineStatus::Ready,
            result: None,
        }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Computes shortest distances from `source` to every vertex
    pub fn compute(&mut self, source: usize) -> Result<&ShortestPathResult<W>> {
        self.compute_observed(source, &mut NoopObserver)
    }

    /// Like [`compute`](Self::compute), reporting every finalization to `observer`.
    ///
    /// If the observer breaks, the engine ends up `Aborted`: the partial maps are kept
    /// for [`partial_result`](Self::partial_result) and queries fail with `NotComputed`.
    pub fn compute_observed<O>(
        &mut self,
        source: usize,
        observer: &mut O,
    ) -> Result<&ShortestPathResult<W>>
    where
        O: StepObserver<W> + ?Sized,
    {
        if !self.graph.has_node(source) {
            return Err(Error::InvalidSource(source));
        }

        self.result = None;
        self.status = EngineStatus::Running;

        let outcome = self.algorithm.run(self.graph, source, observer);
        let (result, termination) = match outcome {
            Ok(run) => run,
            Err(e) => {
                self.status = EngineStatus::Ready;
                return Err(e);
            }
        };

        self.status = match termination {
            Termination::Exhausted => EngineStatus::Completed,
            Termination::Aborted => {
                debug!(
                    "run from {} aborted after {} finalizations",
                    source,
                    result.settle_order.len()
                );
                EngineStatus::Aborted
            }
        };
        Ok(self.result.insert(result))
    }

    /// The frozen result of the last completed run
    pub fn result(&self) -> Result<&ShortestPathResult<W>> {
        match (self.status, &self.result) {
            (EngineStatus::Completed, Some(result)) => Ok(result),
            _ => Err(Error::NotComputed),
        }
    }

    /// Consumes the engine, returning the result of the last completed run
    pub fn into_result(self) -> Result<ShortestPathResult<W>> {
        match (self.status, self.result) {
            (EngineStatus::Completed, Some(result)) => Ok(result),
            _ => Err(Error::NotComputed),
        }
    }

    /// Maps left behind by an aborted run
    pub fn partial_result(&self) -> Option<&ShortestPathResult<W>> {
        match self.status {
            EngineStatus::Aborted => self.result.as_ref(),
            _ => None,
        }
    }

    /// Source of the last completed run
    pub fn source(&self) -> Result<usize> {
        self.result().map(|r| r.source)
    }

    /// Shortest distance from the source to `node`, `None` standing for infinity
    pub fn distance_to(&self, node: usize) -> Result<Option<W>> {
        self.result()?.distance_to(node)
    }

    /// Shortest path from the source to `node`; `Ok(None)` when there is no path
    pub fn path_to(&self, node: usize) -> Result<Option<Path<W>>> {
        self.result()?.path_to(node)
    }

    /// Vertices in the order they were finalized
    pub fn settle_order(&self) -> Result<&[usize]> {
        self.result().map(|r| r.settle_order.as_slice())
    }
}
