use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use relaxa::algorithm::dijkstra::Dijkstra;
use relaxa::algorithm::ShortestPathAlgorithm;
use relaxa::graph::generators::{generate_grid, generate_sparse, guadalajara};
use relaxa::graph::{Graph, MutableGraph, WeightedGraph};
use relaxa::{Error, ShortestPathEngine};

// Graph from the reference scenario: the direct 0-1 edge loses to 0-2-1
fn diamond() -> WeightedGraph<u32> {
    WeightedGraph::from_edges(4, vec![(0, 1, 10), (0, 2, 3), (2, 1, 4), (1, 3, 2)]).unwrap()
}

// Minimum path weight from `source` to every vertex by enumerating all simple paths
fn brute_force(graph: &WeightedGraph<u64>, source: usize) -> Vec<Option<u64>> {
    fn walk(
        graph: &WeightedGraph<u64>,
        u: usize,
        cost: u64,
        on_path: &mut Vec<bool>,
        best: &mut Vec<Option<u64>>,
    ) {
        if best[u].map_or(true, |b| cost < b) {
            best[u] = Some(cost);
        }
        for (v, w) in graph.neighbors(u) {
            if !on_path[v] {
                on_path[v] = true;
                walk(graph, v, cost + w, on_path, best);
                on_path[v] = false;
            }
        }
    }

    let mut best = vec![None; graph.node_count()];
    let mut on_path = vec![false; graph.node_count()];
    on_path[source] = true;
    walk(graph, source, 0, &mut on_path, &mut best);
    best
}

#[test]
fn test_reference_scenario() {
    let graph = diamond();
    let mut engine = ShortestPathEngine::new(&graph);
    engine.compute(0).unwrap();

    let distances: Vec<_> = (0..4).map(|v| engine.distance_to(v).unwrap()).collect();
    assert_eq!(distances, vec![Some(0), Some(7), Some(3), Some(9)]);

    let path = engine.path_to(3).unwrap().expect("vertex 3 is reachable");
    assert_eq!(path.nodes, vec![0, 2, 1, 3]);
    assert_eq!(path.distance, 9);
    assert_eq!(path.hops(), 3);
    assert_eq!(path.edges().collect::<Vec<_>>(), vec![(0, 2), (2, 1), (1, 3)]);
}

#[test]
fn test_isolated_vertex_has_no_path() {
    let mut graph = diamond();
    let isolated = graph.add_node(None);
    assert_eq!(isolated, 4);

    let mut engine = ShortestPathEngine::new(&graph);
    let result = engine.compute(0).unwrap();
    assert!(!result.is_reachable(4));
    assert!(!result.visited[4]);
    assert_eq!(result.predecessors[4], None);
    assert_eq!(result.reachable_count(), 4);

    assert_eq!(engine.distance_to(4).unwrap(), None);
    assert_eq!(engine.path_to(4).unwrap(), None);
}

#[test]
fn test_source_distance_is_zero() {
    let graph = guadalajara();
    let mut engine = ShortestPathEngine::new(&graph);
    for source in 0..graph.node_count() {
        engine.compute(source).unwrap();
        assert_eq!(engine.distance_to(source).unwrap(), Some(0));
        let path = engine.path_to(source).unwrap().unwrap();
        assert_eq!(path.nodes, vec![source]);
    }
}

#[test]
fn test_single_edge_symmetry() {
    let mut graph = WeightedGraph::with_nodes(2);
    graph.add_edge(0, 1, 5u32).unwrap();

    let mut engine = ShortestPathEngine::new(&graph);
    engine.compute(0).unwrap();
    assert_eq!(engine.distance_to(1).unwrap(), Some(5));
    engine.compute(1).unwrap();
    assert_eq!(engine.distance_to(0).unwrap(), Some(5));
    assert_eq!(engine.path_to(0).unwrap().unwrap().nodes, vec![1, 0]);
}

#[test]
fn test_cheaper_route_wins_over_direct_edge() {
    // Direct edge is inserted first so its frontier entry is pushed first and goes stale
    let mut graph = WeightedGraph::with_nodes(4);
    graph.add_edge(0, 3, 100u32).unwrap();
    graph.add_edge(0, 1, 1).unwrap();
    graph.add_edge(1, 2, 1).unwrap();
    graph.add_edge(2, 3, 1).unwrap();

    let result = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
    assert_eq!(result.distances[3], Some(3));
    assert_eq!(result.predecessors[3], Some(2));
    assert!(result.stats.stale_pops >= 1);
    assert_eq!(result.stats.pops, result.settle_order.len() + result.stats.stale_pops);
}

#[test]
fn test_cheaper_route_wins_regardless_of_insertion_order() {
    // Same two routes to vertex 2, inserted in both orders
    let orders: [[(usize, usize, u32); 3]; 2] = [
        [(0, 2, 10), (0, 1, 1), (1, 2, 1)],
        [(0, 1, 1), (1, 2, 1), (0, 2, 10)],
    ];
    for edges in orders {
        let graph = WeightedGraph::from_edges(3, edges).unwrap();
        let result = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
        assert_eq!(result.distances, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(result.predecessors, vec![None, Some(0), Some(1)]);
    }
}

#[test]
fn test_vertex_improved_several_times() {
    // Vertex 4 is relaxed three times with decreasing distances before being finalized
    let graph = WeightedGraph::from_edges(
        5,
        vec![(0, 4, 30u32), (0, 1, 1), (1, 4, 20), (1, 2, 1), (2, 4, 10), (2, 3, 1), (3, 4, 1)],
    )
    .unwrap();

    let result = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
    assert_eq!(result.distances[4], Some(4));
    assert_eq!(result.path_to(4).unwrap().unwrap().nodes, vec![0, 1, 2, 3, 4]);
    assert_eq!(result.settle_order.len(), 5);
    assert!(result.stats.stale_pops >= 3);
}

#[test]
fn test_zero_weight_edges_and_self_loops() {
    let mut graph = WeightedGraph::with_nodes(3);
    graph.add_edge(0, 0, 0u32).unwrap();
    graph.add_edge(0, 1, 0).unwrap();
    graph.add_edge(1, 1, 4).unwrap();
    graph.add_edge(1, 2, 2).unwrap();

    let result = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
    assert_eq!(result.distances, vec![Some(0), Some(0), Some(2)]);
    assert_eq!(result.predecessors[0], None);
    assert_eq!(result.path_to(2).unwrap().unwrap().nodes, vec![0, 1, 2]);
}

#[test]
fn test_sums_past_weight_range_do_not_relax() {
    let graph = WeightedGraph::from_edges(3, vec![(0, 1, u32::MAX), (1, 2, 2)]).unwrap();
    let mut engine = ShortestPathEngine::new(&graph);
    engine.compute(0).unwrap();

    assert_eq!(engine.distance_to(1).unwrap(), Some(u32::MAX));
    // u32::MAX + 2 does not fit, so vertex 2 stays unreachable
    assert_eq!(engine.distance_to(2).unwrap(), None);
    assert_eq!(engine.path_to(1).unwrap().unwrap().nodes, vec![0, 1]);
    assert_eq!(engine.path_to(2).unwrap(), None);

    let result = engine.result().unwrap();
    assert_eq!(result.predecessors, vec![None, Some(0), None]);
}

#[test]
fn test_infinite_float_sums_do_not_relax() {
    let mut graph = WeightedGraph::with_nodes(3);
    graph.add_edge(0, 1, OrderedFloat(f64::MAX)).unwrap();
    graph.add_edge(1, 2, OrderedFloat(f64::MAX)).unwrap();

    let result = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
    assert_eq!(result.distances[1], Some(OrderedFloat(f64::MAX)));
    assert_eq!(result.distances[2], None);
}

#[test]
fn test_parallel_edge_cheaper_one_used() {
    let graph = WeightedGraph::from_edges(2, vec![(0, 1, 9u32), (1, 0, 4), (0, 1, 6)]).unwrap();
    let result = Dijkstra::new().compute_shortest_paths(&graph, 1).unwrap();
    assert_eq!(result.distances[0], Some(4));
}

#[test]
fn test_matches_brute_force_on_random_graphs() {
    for seed in 0..200u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = 1 + (seed as usize % 7);
        let graph = generate_sparse(n, 2 * n, 9, &mut rng);

        for source in 0..n {
            let result = Dijkstra::new().compute_shortest_paths(&graph, source).unwrap();
            assert_eq!(
                result.distances,
                brute_force(&graph, source),
                "seed {} source {}",
                seed,
                source
            );

            // Every reconstructed path must follow existing edges and add up to the distance
            for target in 0..n {
                if let Some(path) = result.path_to(target).unwrap() {
                    let total: u64 = path
                        .edges()
                        .map(|(u, v)| {
                            graph
                                .neighbors(u)
                                .filter(|&(x, _)| x == v)
                                .map(|(_, w)| w)
                                .min()
                                .expect("path edge exists")
                        })
                        .sum();
                    assert_eq!(Some(total), result.distances[target]);
                    assert_eq!(path.nodes[0], source);
                }
            }
        }
    }
}

#[test]
fn test_real_valued_weights() {
    let mut graph = WeightedGraph::with_nodes(3);
    graph.add_edge(0, 1, OrderedFloat(0.5)).unwrap();
    graph.add_edge(1, 2, OrderedFloat(0.25)).unwrap();
    graph.add_edge(0, 2, OrderedFloat(1.0)).unwrap();

    let mut engine = ShortestPathEngine::new(&graph);
    engine.compute(0).unwrap();
    assert_eq!(engine.distance_to(2).unwrap(), Some(OrderedFloat(0.75)));
}

#[test]
fn test_guadalajara_routes() {
    let graph = guadalajara();
    let catedral = graph.find_node("Catedral de Guadalajara").unwrap();
    let andares = graph.find_node("Andares").unwrap();

    let mut engine = ShortestPathEngine::new(&graph);
    engine.compute(catedral).unwrap();

    // Catedral -> Plaza de Armas -> Glorieta Minerva -> Andares
    let path = engine.path_to(andares).unwrap().unwrap();
    assert_eq!(path.distance, 180 + 1200 + 1400);
    assert_eq!(path.nodes, vec![0, 1, 9, 11]);
    // Through Expiatorio beats the direct Parque Revolución edge
    let path = engine.path_to(14).unwrap().unwrap();
    assert_eq!(path.nodes, vec![0, 3, 6, 10, 14]);
    assert_eq!(path.distance, 260 + 700 + 400 + 600);
}

#[test]
fn test_grid_distances_are_manhattan() {
    let graph = generate_grid(6, 5);
    let result = Dijkstra::new().compute_shortest_paths(&graph, 0).unwrap();
    for y in 0..5 {
        for x in 0..6 {
            assert_eq!(result.distances[y * 6 + x], Some((x + y) as u64));
        }
    }
}

#[test]
fn test_get_path_through_trait() {
    let graph = diamond();
    let dijkstra = Dijkstra::new();
    let result = dijkstra.compute_shortest_paths(&graph, 0).unwrap();

    let path = <Dijkstra as ShortestPathAlgorithm<u32, WeightedGraph<u32>>>::get_path(&dijkstra, &result, 3);
    assert_eq!(path, Some(vec![0, 2, 1, 3]));
    assert_eq!(<Dijkstra as ShortestPathAlgorithm<u32, WeightedGraph<u32>>>::name(&dijkstra), "Dijkstra");
}

#[test]
fn test_out_of_range_queries() {
    let graph = diamond();
    let mut engine = ShortestPathEngine::new(&graph);
    assert_eq!(engine.compute(4).unwrap_err(), Error::InvalidSource(4));

    engine.compute(0).unwrap();
    assert_eq!(engine.distance_to(10).unwrap_err(), Error::InvalidNode(10));
    assert_eq!(engine.path_to(10).unwrap_err(), Error::InvalidNode(10));
}
