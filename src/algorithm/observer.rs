//! Step observation for presentation layers.
//!
//! The relaxation loop hands a borrowed [`StepView`] of its live maps to a
//! [`StepObserver`] once before the first pop and once after every finalization.
//! The maps keep mutating after the callback returns, so an observer that wants to
//! keep history must take an owned [`Snapshot`].

use std::ops::ControlFlow;

use serde::Serialize;

use crate::graph::Weight;

/// Read-only view of the engine state between two relaxation steps
#[derive(Debug, Clone, Copy)]
pub struct StepView<'a, W> {
    /// 0 for the initial state, then the number of vertices finalized so far
    pub step: usize,
    pub source: usize,
    /// The vertex finalized in this step, `None` for the initial state
    pub current: Option<usize>,
    pub distances: &'a [Option<W>],
    pub visited: &'a [bool],
    pub predecessors: &'a [Option<usize>],
    /// Entries left in the frontier, stale ones included
    pub frontier_len: usize,
}

impl<W> StepView<'_, W>
where
    W: Weight,
{
    /// Copies the borrowed maps into an owned snapshot
    pub fn snapshot(&self) -> Snapshot<W> {
        Snapshot {
            step: self.step,
            source: self.source,
            current: self.current,
            distances: self.distances.to_vec(),
            visited: self.visited.to_vec(),
            predecessors: self.predecessors.to_vec(),
            frontier_len: self.frontier_len,
        }
    }
}

/// Owned copy of a [`StepView`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot<W> {
    pub step: usize,
    pub source: usize,
    pub current: Option<usize>,
    pub distances: Vec<Option<W>>,
    pub visited: Vec<bool>,
    pub predecessors: Vec<Option<usize>>,
    pub frontier_len: usize,
}

/// Receives engine progress. Returning `ControlFlow::Break` stops the run before the next pop.
pub trait StepObserver<W> {
    fn on_step(&mut self, view: &StepView<'_, W>) -> ControlFlow<()>;
}

/// Observer backed by a closure, see [`from_fn`]
#[derive(Debug, Clone, Copy)]
pub struct FnObserver<F>(F);

/// Wraps a closure as a [`StepObserver`].
///
/// ```
/// use std::ops::ControlFlow;
/// use relaxa::algorithm::observer::from_fn;
///
/// let mut finalized = Vec::new();
/// let _observer = from_fn(|view: &relaxa::StepView<'_, u32>| {
///     finalized.extend(view.current);
///     ControlFlow::Continue(())
/// });
/// ```
pub fn from_fn<W, F>(f: F) -> FnObserver<F>
where
    F: FnMut(&StepView<'_, W>) -> ControlFlow<()>,
{
    FnObserver(f)
}

impl<W, F> StepObserver<W> for FnObserver<F>
where
    F: FnMut(&StepView<'_, W>) -> ControlFlow<()>,
{
    fn on_step(&mut self, view: &StepView<'_, W>) -> ControlFlow<()> {
        (self.0)(view)
    }
}

/// Observer that ignores every step
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<W> StepObserver<W> for NoopObserver {
    fn on_step(&mut self, _view: &StepView<'_, W>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Records a snapshot of every step, optionally stopping after a fixed number of steps
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder<W> {
    snapshots: Vec<Snapshot<W>>,
    step_limit: Option<usize>,
}

impl<W> TraceRecorder<W>
where
    W: Weight,
{
    pub fn new() -> Self {
        TraceRecorder {
            snapshots: Vec::new(),
            step_limit: None,
        }
    }

    /// Stop the run once `limit` vertices have been finalized
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn snapshots(&self) -> &[Snapshot<W>] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot<W>> {
        self.snapshots
    }
}

impl<W> StepObserver<W> for TraceRecorder<W>
where
    W: Weight,
{
    fn on_step(&mut self, view: &StepView<'_, W>) -> ControlFlow<()> {
        self.snapshots.push(view.snapshot());
        match self.step_limit {
            Some(limit) if view.step >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}
