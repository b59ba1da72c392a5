use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use relaxa::graph::generators::{generate_connected, generate_grid};
use relaxa::ShortestPathEngine;

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_random");
    let mut rng = StdRng::seed_from_u64(7);
    for &n in &[1_000usize, 10_000, 100_000] {
        let graph = generate_connected(n, 2 * n, 100, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &graph, |b, graph| {
            b.iter(|| {
                let mut engine = ShortestPathEngine::new(graph);
                engine.compute(black_box(0)).map(|r| r.reachable_count()).ok()
            })
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let graph = generate_grid(300, 300);
    c.bench_function("dijkstra_grid_300x300", |b| {
        b.iter(|| {
            let mut engine = ShortestPathEngine::new(&graph);
            engine.compute(black_box(0)).map(|r| r.stats.stale_pops).ok()
        })
    });
}

criterion_group!(benches, bench_random, bench_grid);
criterion_main!(benches);
