use crate::graph::{MutableGraph, WeightedGraph};
use rand::prelude::*;

/// Landmarks of central Guadalajara, indexed as in [`GUADALAJARA_EDGES`]
pub const GUADALAJARA_LANDMARKS: [&str; 15] = [
    "Catedral de Guadalajara",
    "Plaza de Armas",
    "Mercado San Juan de Dios",
    "Teatro Degollado",
    "Hospicio Cabañas",
    "Parque Agua Azul",
    "Parque Revolución",
    "Bosque Los Colomos",
    "Estación Juárez",
    "Glorieta Minerva",
    "Expiatorio",
    "Andares",
    "Zapopan Centro",
    "Plaza Patria",
    "Universidad de Guadalajara",
];

/// Walking connections between landmarks, in meters.
/// The list repeats `(11, 12)` on purpose: parallel edges are part of the data set.
pub const GUADALAJARA_EDGES: [(usize, usize, u32); 24] = [
    (0, 1, 180),
    (0, 3, 260),
    (1, 2, 450),
    (1, 9, 1200),
    (2, 8, 900),
    (3, 4, 600),
    (3, 6, 700),
    (4, 7, 1500),
    (4, 10, 900),
    (5, 6, 500),
    (5, 11, 3400),
    (6, 10, 400),
    (6, 14, 1100),
    (7, 12, 4200),
    (8, 9, 600),
    (9, 11, 1400),
    (11, 12, 800),
    (12, 13, 900),
    (13, 9, 1000),
    (10, 14, 600),
    (2, 5, 1600),
    (1, 3, 330),
    (0, 2, 700),
    (12, 11, 800),
];

/// Drawing coordinates for each landmark, for presentation layers
pub const GUADALAJARA_LAYOUT: [(f64, f64); 15] = [
    (3.5, 3.0),
    (3.5, 2.2),
    (4.5, 1.5),
    (2.5, 2.6),
    (1.0, 2.8),
    (4.0, 0.2),
    (2.0, 1.0),
    (0.0, 3.8),
    (5.8, 2.6),
    (6.2, 1.5),
    (1.0, 1.7),
    (7.5, 0.8),
    (8.2, 2.8),
    (6.5, 2.8),
    (2.0, -0.2),
];

/// Builds the Guadalajara landmark map with distances in meters
pub fn guadalajara() -> WeightedGraph<u32> {
    let mut graph = WeightedGraph::from_labels(GUADALAJARA_LANDMARKS);
    for (u, v, w) in GUADALAJARA_EDGES {
        graph
            .add_edge(u, v, w)
            .expect("preset edges reference the 15 landmarks");
    }
    graph
}

/// Generates a connected random graph with `n` vertices.
///
/// A random spanning tree guarantees connectivity, then `extra_edges` more edges are
/// drawn uniformly between distinct vertices. Weights are uniform in `1..=max_weight`.
pub fn generate_connected<R: Rng + ?Sized>(
    n: usize,
    extra_edges: usize,
    max_weight: u64,
    rng: &mut R,
) -> WeightedGraph<u64> {
    let max_weight = max_weight.max(1);
    let mut edges = Vec::with_capacity(n.saturating_sub(1) + extra_edges);

    for v in 1..n {
        let u = rng.gen_range(0..v);
        edges.push((u, v, rng.gen_range(1..=max_weight)));
    }

    if n > 1 {
        for _ in 0..extra_edges {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            if u != v {
                edges.push((u, v, rng.gen_range(1..=max_weight)));
            }
        }
    }

    WeightedGraph::from_edges(n, edges).expect("endpoints are drawn from 0..n")
}

/// Generates a random graph with `n` vertices and up to `edges` edges, possibly disconnected.
/// Zero weights are allowed so that ties are common.
pub fn generate_sparse<R: Rng + ?Sized>(
    n: usize,
    edges: usize,
    max_weight: u64,
    rng: &mut R,
) -> WeightedGraph<u64> {
    if n == 0 {
        return WeightedGraph::new();
    }

    let edges: Vec<_> = (0..edges)
        .map(|_| {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            (u, v, rng.gen_range(0..=max_weight))
        })
        .collect();

    WeightedGraph::from_edges(n, edges).expect("endpoints are drawn from 0..n")
}

/// Generates a 4-connected `width` x `height` grid with unit weights.
/// Vertex `(x, y)` has index `y * width + x`.
pub fn generate_grid(width: usize, height: usize) -> WeightedGraph<u64> {
    let mut edges = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let vertex = y * width + x;
            if x + 1 < width {
                edges.push((vertex, vertex + 1, 1));
            }
            if y + 1 < height {
                edges.push((vertex, vertex + width, 1));
            }
        }
    }

    WeightedGraph::from_edges(width * height, edges).expect("grid neighbors stay inside the grid")
}
