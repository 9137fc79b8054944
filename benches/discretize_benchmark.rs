//! Benchmark for feature discretisation across dataset sizes and division budgets
//!
//! Run with: cargo bench --bench discretize_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use lucs_dn::pipeline::{apply_discretization, discretize_features, DiscretizeConfig};

/// Generate synthetic data with a three-valued class column
fn generate_test_dataframe(n_rows: usize, n_features: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let labels = ["red", "green", "blue"];
    let class_idx: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..labels.len())).collect();
    let class: Vec<&str> = class_idx.iter().map(|&i| labels[i]).collect();

    let mut columns: Vec<Column> = vec![Column::new("class".into(), class)];

    for i in 0..n_features {
        let values: Vec<f64> = match i % 3 {
            // Uniform noise
            0 => (0..n_rows).map(|_| rng.gen::<f64>() * 100.0).collect(),
            // Right-skewed
            1 => (0..n_rows)
                .map(|_| {
                    let v = rng.gen::<f64>();
                    (v * v * v) * 100.0
                })
                .collect(),
            // Class-driven bands with overlap
            _ => class_idx
                .iter()
                .map(|&c| c as f64 * 30.0 + rng.gen::<f64>() * 40.0)
                .collect(),
        };

        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

fn feature_names(n_features: usize) -> Vec<String> {
    (0..n_features).map(|i| format!("feature_{}", i)).collect()
}

/// Benchmark discretisation for varying dataset sizes
fn benchmark_dataset_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("discretize_dataset_sizes");

    let sizes = [(1_000, 10), (10_000, 20), (50_000, 50)];
    let config = DiscretizeConfig::default();

    for (n_rows, n_features) in sizes {
        let df = generate_test_dataframe(n_rows, n_features, 42);
        let features = feature_names(n_features);
        group.throughput(Throughput::Elements(n_features as u64));

        group.bench_with_input(
            BenchmarkId::new("discretize", format!("{}x{}", n_rows, n_features)),
            &df,
            |b, df| {
                b.iter(|| {
                    let _ = discretize_features(
                        black_box(df),
                        black_box("class"),
                        black_box(&features),
                        black_box(&config),
                    );
                });
            },
        );
    }

    group.finish();
}

/// Benchmark with varying division budgets
fn benchmark_division_budgets(c: &mut Criterion) {
    let mut group = c.benchmark_group("division_budget_impact");

    let df = generate_test_dataframe(10_000, 10, 42);
    let features = feature_names(10);

    for max_divisions in [1, 2, 5, 10, 50] {
        let config = DiscretizeConfig::new(max_divisions);
        group.bench_with_input(
            BenchmarkId::new("max_divisions", max_divisions),
            &config,
            |b, config| {
                b.iter(|| {
                    let _ = discretize_features(
                        black_box(&df),
                        black_box("class"),
                        black_box(&features),
                        black_box(config),
                    );
                });
            },
        );
    }

    group.finish();
}

/// Benchmark writing category labels back into the frame
fn benchmark_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_discretization");

    for n_rows in [10_000, 100_000] {
        let df = generate_test_dataframe(n_rows, 10, 7);
        let run = discretize_features(&df, "class", &feature_names(10), &DiscretizeConfig::default())
            .expect("Discretisation failed");
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("apply", n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = apply_discretization(black_box(df), black_box(&run.results));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_dataset_sizes,
    benchmark_division_budgets,
    benchmark_apply
);
criterion_main!(benches);
