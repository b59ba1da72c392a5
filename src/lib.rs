//! Relaxa - single-source shortest paths with observable relaxation steps
//!
//! The core of the library is a classic Dijkstra engine over weighted undirected
//! graphs. The frontier is a binary heap with lazy deletion: superseded entries are
//! left in the queue and discarded when popped, instead of decreasing keys in place.
//! Every finalization can be observed through a [`StepObserver`], which lets a
//! presentation layer record immutable snapshots without the engine doing any I/O.
//!
//! A small round-robin dispatcher over a fixed server pool lives in [`balancer`].

pub mod algorithm;
pub mod balancer;
pub mod data_structures;
pub mod graph;
pub mod web;

/// Re-export main types for convenient use
pub use algorithm::{
    dijkstra::Dijkstra,
    engine::{EngineStatus, ShortestPathEngine},
    observer::{Snapshot, StepObserver, StepView, TraceRecorder},
    Path, SearchStats, ShortestPathAlgorithm, ShortestPathResult,
};
pub use balancer::RoundRobin;
pub use graph::undirected::WeightedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid edge ({from}, {to}): {reason}")]
    InvalidEdge {
        from: usize,
        to: usize,
        reason: &'static str,
    },

    #[error("Invalid source vertex: {0}")]
    InvalidSource(usize),

    #[error("Invalid vertex ID: {0}")]
    InvalidNode(usize),

    #[error("No completed shortest path computation to query")]
    NotComputed,

    #[error("Server pool is empty")]
    EmptyPool,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
