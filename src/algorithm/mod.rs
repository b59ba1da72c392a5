pub mod traits;
pub mod observer;
pub mod dijkstra;
pub mod engine;
pub mod batch;

pub use traits::{Path, SearchStats, ShortestPathAlgorithm, ShortestPathResult};
