//! Criterion benchmarks for u-aco.
//!
//! Uses synthetic objective tables so the numbers reflect colony overhead
//! only: path construction, validation retries, and pheromone updates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_aco::aco::{AcoConfig, AcoRunner, ObjectiveTable, PathBuilder, PheromoneMatrix};
use u_aco::random::create_rng;

fn bench_build_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_path");

    for &cols in &[4usize, 8, 16] {
        let config = AcoConfig::default().with_grid(6, cols, 0.2);
        let builder = PathBuilder::new(config.grid());
        let matrix = PheromoneMatrix::new(6, cols, 1.0);

        group.bench_with_input(BenchmarkId::new("single", cols), &cols, |b, _| {
            let mut rng = create_rng(42);
            b.iter(|| black_box(builder.build(&matrix, &mut rng)))
        });

        group.bench_with_input(BenchmarkId::new("until_valid", cols), &cols, |b, _| {
            let mut rng = create_rng(42);
            b.iter(|| black_box(builder.build_valid(&matrix, None, &mut rng)))
        });
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_run");
    group.sample_size(10);

    for &cols in &[8usize, 16] {
        let config = AcoConfig::default()
            .with_grid(6, cols, 0.2)
            .with_repetitions(1)
            .with_generations(10)
            .with_ants(100)
            .with_seed(42);
        let table = ObjectiveTable::from_fn(&config.grid(), |levels| {
            levels
                .iter()
                .enumerate()
                .map(|(i, x)| (i as f64 + 1.0) * x - x * x)
                .sum()
        });

        group.bench_with_input(BenchmarkId::new("grid", cols), &cols, |b, _| {
            b.iter(|| black_box(AcoRunner::run(&table, &config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_path, bench_full_run);
criterion_main!(benches);
