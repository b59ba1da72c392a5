use std::time::{Duration, Instant};
use rand::rngs::StdRng;
use rand::SeedableRng;
use relaxa::algorithm::batch;
use relaxa::algorithm::{ShortestPathAlgorithm, dijkstra::Dijkstra};
use relaxa::graph::generators::generate_connected;
use relaxa::graph::{Graph, WeightedGraph};

// Run Dijkstra from every source sequentially
fn benchmark_sequential(graph: &WeightedGraph<u64>, sources: &[usize]) -> Duration {
    let dijkstra = Dijkstra::new();
    let start = Instant::now();
    let mut stale = 0;
    for &source in sources {
        if let Ok(result) = dijkstra.compute_shortest_paths(graph, source) {
            stale += result.stats.stale_pops;
        }
    }
    let duration = start.elapsed();
    println!("  - sequential: {:?} ({} stale pops)", duration, stale);
    duration
}

// Run the same sources through the rayon batch
fn benchmark_parallel(graph: &WeightedGraph<u64>, sources: &[usize]) -> Duration {
    let start = Instant::now();
    let results = batch::from_sources(graph, sources);
    let duration = start.elapsed();
    let ok = results.iter().filter(|r| r.is_ok()).count();
    println!("  - parallel:   {:?} ({} runs)", duration, ok);
    duration
}

fn main() {
    env_logger::init();

    let graph_sizes = vec![1_000, 10_000, 50_000, 100_000];
    // Average number of extra edges per vertex on top of the spanning tree
    let edge_factor = 2;
    let queries = 16;

    println!("=====================================================");
    println!("Benchmark: Dijkstra, sequential vs rayon batch");
    println!("Edge factor: {} extra edges per vertex, {} sources", edge_factor, queries);
    println!("=====================================================");

    let mut rng = StdRng::seed_from_u64(42);
    let mut results = Vec::new();

    for &size in &graph_sizes {
        let graph = generate_connected(size, size * edge_factor, 100, &mut rng);
        println!("\nGraph has {} vertices and {} edges", graph.node_count(), graph.edge_count());

        let sources: Vec<usize> = (0..queries).map(|i| i * size / queries).collect();
        let sequential = benchmark_sequential(&graph, &sources);
        let parallel = benchmark_parallel(&graph, &sources);

        let speedup = sequential.as_secs_f64() / parallel.as_secs_f64().max(f64::EPSILON);
        println!("Speedup: {:.2}x", speedup);
        results.push((size, sequential, parallel, speedup));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15} | {:<10}", "Vertices", "Sequential (ms)", "Parallel (ms)", "Speedup");
    println!("-----------------------------------------------------");

    for (size, sequential, parallel, speedup) in &results {
        println!(
            "{:<10} | {:<15} | {:<15} | {:<10.2}",
            size,
            sequential.as_millis(),
            parallel.as_millis(),
            speedup
        );
    }
}
