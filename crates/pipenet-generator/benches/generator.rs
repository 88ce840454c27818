//! Benchmarks for random board generation.
//!
//! Measures the complete generation pipeline (spanning tree, loop edges,
//! empty-cell placement, shape derivation, scrambling) on a plain 5x5
//! board and on a larger wrapping board with empties and loops.
//!
//! # Test Data
//!
//! Uses three fixed seeds to ensure reproducibility while covering
//! multiple cases:
//!
//! - **`seed_0`**: `7f3a9c0e5d1b48f2a6c8e0d4b2f19573c5a7e9d1f3b58042a6c8e0f2d4b69781`
//! - **`seed_1`**: `a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3`
//! - **`seed_2`**: `1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef`
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use pipenet_generator::{BoardGenerator, BoardSeed, GeneratorParams};

const SEEDS: [&str; 3] = [
    "7f3a9c0e5d1b48f2a6c8e0d4b2f19573c5a7e9d1f3b58042a6c8e0f2d4b69781",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn bench_generator_5x5(c: &mut Criterion) {
    let generator = BoardGenerator::new(GeneratorParams::default());

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = BoardSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new("generator_5x5", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_generator_wrapping_10x10(c: &mut Criterion) {
    let generator = BoardGenerator::new(GeneratorParams {
        rows: 10,
        cols: 10,
        wrapping: true,
        nb_empty: 8,
        nb_extra: 6,
    });

    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = BoardSeed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new("generator_wrapping_10x10", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_generator_5x5,
        bench_generator_wrapping_10x10
);
criterion_main!(benches);
