use crate::graph::traits::{Graph, MutableGraph, Weight};
use crate::{Error, Result};

/// An undirected weighted graph implementation using adjacency lists
///
/// Every edge is stored once per direction, so `neighbors(u)` and `neighbors(v)` both
/// see an edge `(u, v, w)`. Parallel edges and self-loops are kept as inserted.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph<W>
where
    W: Weight,
{
    /// Optional display label per vertex
    labels: Vec<Option<String>>,

    /// Adjacency for each vertex: vertex_id -> [(neighbor, weight)]
    adjacency: Vec<Vec<(usize, W)>>,

    /// Inserted edges as given to `add_edge`
    edges: Vec<(usize, usize, W)>,
}

impl<W> WeightedGraph<W>
where
    W: Weight,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        WeightedGraph {
            labels: Vec::new(),
            adjacency: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Creates a graph with `nodes` unlabeled vertices and no edges
    pub fn with_nodes(nodes: usize) -> Self {
        WeightedGraph {
            labels: vec![None; nodes],
            adjacency: vec![Vec::new(); nodes],
            edges: Vec::new(),
        }
    }

    /// Creates a graph with one labeled vertex per item, indexed in iteration order
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<Option<String>> = labels.into_iter().map(|l| Some(l.into())).collect();
        let adjacency = vec![Vec::new(); labels.len()];
        WeightedGraph {
            labels,
            adjacency,
            edges: Vec::new(),
        }
    }

    /// Builds a graph with `nodes` vertices from an edge list, stopping at the first invalid edge
    pub fn from_edges<I>(nodes: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = WeightedGraph::with_nodes(nodes);
        for (u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Inserted edges in insertion order
    pub fn edges(&self) -> &[(usize, usize, W)] {
        &self.edges
    }

    /// Number of adjacency entries of a vertex (a self-loop counts twice)
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, Vec::len)
    }

    /// Copies the graph with every weight converted by `f`, keeping labels and edge order
    pub fn map_weights<V, F>(&self, f: F) -> WeightedGraph<V>
    where
        V: Weight,
        F: Fn(W) -> V,
    {
        WeightedGraph {
            labels: self.labels.clone(),
            adjacency: self
                .adjacency
                .iter()
                .map(|list| list.iter().map(|&(v, w)| (v, f(w))).collect())
                .collect(),
            edges: self.edges.iter().map(|&(u, v, w)| (u, v, f(w))).collect(),
        }
    }

    /// Index of the first vertex carrying `label`
    pub fn find_node(&self, label: &str) -> Option<usize> {
        self.labels
            .iter()
            .position(|l| l.as_deref() == Some(label))
    }
}

impl<W> Graph<W> for WeightedGraph<W>
where
    W: Weight,
{
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn neighbors(&self, node: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_> {
        match self.adjacency.get(node) {
            Some(list) => Box::new(list.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn label(&self, node: usize) -> Option<&str> {
        self.labels.get(node).and_then(|l| l.as_deref())
    }
}

impl<W> MutableGraph<W> for WeightedGraph<W>
where
    W: Weight,
{
    fn add_node(&mut self, label: Option<&str>) -> usize {
        let id = self.adjacency.len();
        self.labels.push(label.map(str::to_owned));
        self.adjacency.push(Vec::new());
        id
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        if !self.has_node(from) || !self.has_node(to) {
            return Err(Error::InvalidEdge {
                from,
                to,
                reason: "vertex index out of range",
            });
        }
        if weight < W::zero() {
            return Err(Error::InvalidEdge {
                from,
                to,
                reason: "negative weight",
            });
        }

        self.adjacency[from].push((to, weight));
        self.adjacency[to].push((from, weight));
        self.edges.push((from, to, weight));
        Ok(())
    }
}
