pub mod traits;
pub mod undirected;
pub mod generators;

pub use traits::{Graph, MutableGraph, Weight};
pub use undirected::WeightedGraph;
