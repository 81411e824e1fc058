//! Benchmarks for the tile drivers.
//!
//! Compares tile sizes for GEMM and TRMM at a few problem sizes, and the
//! serial scheduler against the parallel one.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tile_blas::{
    gemm, pgemm, trmm, Diag, Request, Sequence, Side, TaskGraph, TileConfig, TileLayout,
    TiledMatrix, Transpose, Uplo,
};

fn operand(n: usize, offset: usize) -> Vec<f64> {
    (0..n * n).map(|i| (((i + offset) % 1000) as f64) * 0.001).collect()
}

/// GEMM throughput across tile sizes.
fn bench_gemm(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gemm");
    group.sample_size(10);

    for size in [128, 256, 512].iter() {
        let n = *size;
        let a = operand(n, 0);
        let b = operand(n, 500);

        group.throughput(Throughput::Elements((2 * n * n * n) as u64));

        for nb in [32, 64, 128].iter() {
            let config = TileConfig::new(*nb, None);
            group.bench_with_input(BenchmarkId::new(format!("nb{}", nb), n), &n, |bench, &n| {
                let mut out = vec![0.0f64; n * n];
                bench.iter(|| {
                    gemm(
                        Transpose::NoTrans, Transpose::NoTrans,
                        n, n, n,
                        1.0, &a, n, &b, n,
                        0.0, &mut out, n,
                        &config,
                    )
                    .unwrap();
                    black_box(&out);
                });
            });
        }
    }

    group.finish();
}

/// Left upper TRMM, the case with the longest trailing sweep per row.
fn bench_trmm(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trmm");
    group.sample_size(10);

    for size in [128, 256, 512].iter() {
        let n = *size;
        let a = operand(n, 0);
        let b = operand(n, 500);

        group.throughput(Throughput::Elements((n * n * n) as u64));

        group.bench_with_input(BenchmarkId::new("LeftUpper", n), &n, |bench, &n| {
            let config = TileConfig::SMALL;
            bench.iter(|| {
                let mut out = b.clone();
                trmm(
                    Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit,
                    n, n, 1.0, &a, n, &mut out, n,
                    &config,
                )
                .unwrap();
                black_box(out)
            });
        });
    }

    group.finish();
}

/// Task graph execution on pre-tiled operands, serial vs parallel.
fn bench_schedulers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scheduler");
    group.sample_size(10);

    let n = 256;
    let layout = TileLayout::square(n, n, 64);
    let a = TiledMatrix::from_fn(layout, |i, j| ((i * 7 + j) % 13) as f64).unwrap();
    let b = TiledMatrix::from_fn(layout, |i, j| ((i + j * 3) % 11) as f64).unwrap();
    let c_tiles = TiledMatrix::<f64>::zeros(layout).unwrap();

    let build = || {
        let sequence = Sequence::new();
        let mut request = Request::new();
        let mut graph = TaskGraph::new();
        pgemm(
            Transpose::NoTrans, Transpose::NoTrans,
            1.0, &a, &b, 0.0, &c_tiles,
            &mut graph, &sequence, &mut request,
        );
        (graph, sequence)
    };

    group.throughput(Throughput::Elements((2 * n * n * n) as u64));

    group.bench_function("serial", |bench| {
        bench.iter(|| {
            let (graph, sequence) = build();
            graph.execute_serial(&sequence);
            black_box(sequence.is_failed())
        });
    });

    group.bench_function("parallel", |bench| {
        bench.iter(|| {
            let (graph, sequence) = build();
            graph.execute(&sequence);
            black_box(sequence.is_failed())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_gemm, bench_trmm, bench_schedulers);
criterion_main!(benches);
