//! Criterion benchmarks for spherical containment.
//! Focus sizes: edges in {12, 64, 256, 1024}; accelerators none / slice-array / slice-tree.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p fovcheck

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fovcheck::prelude::*;

fn star(n: usize, seed: u64) -> SlicedPolygon {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(n),
        ..StarCfg::default()
    };
    draw_star(cfg, ConeClock::new(0.8, 1.3), ReplayToken::new(seed, n as u64))
        .polygon()
        .expect("star footprints are valid polygons")
}

fn bench_contains(c: &mut Criterion) {
    let queries = random_directions(1024, ReplayToken::new(2025, 0));
    let mut group = c.benchmark_group("contains");
    for &n in &[12usize, 64, 256, 1024] {
        let accels: [(&str, Option<AcceleratorKind>); 3] = [
            ("none", None),
            ("slice_array", Some(AcceleratorKind::SliceArray)),
            ("slice_tree", Some(AcceleratorKind::slice_tree())),
        ];
        for (name, kind) in accels {
            let mut p = star(n, 42);
            if let Some(kind) = kind {
                p.attach_accelerator(kind);
            }
            group.bench_with_input(BenchmarkId::new(name, n), &n, |b, _| {
                b.iter(|| p.contains_many(&queries))
            });
        }
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[12usize, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("slice_array", n), &n, |b, &n| {
            b.iter_batched(
                || star(n, 7),
                |mut p| p.attach_accelerator(AcceleratorKind::SliceArray),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("slice_tree", n), &n, |b, &n| {
            b.iter_batched(
                || star(n, 7),
                |mut p| p.attach_accelerator(AcceleratorKind::slice_tree()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contains, bench_build);
criterion_main!(benches);
