//! Extraction throughput: direct backend fetches vs adapted extractors.

use std::time::Duration;

use clusterbridge::backend::{ColMatrix, CompressedSparseMatrix, RowMatrix};
use clusterbridge::consumer::{ConsecutiveAccessExtractor, IndexedAccessExtractor, Matrix, RandomAccessExtractor};
use clusterbridge::testing::{random_row_matrix_f32, random_sequence, random_sparse_f64};
use clusterbridge::{AdapterParams, MatrixAdapter};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const DIMS: usize = 64;
const OBSERVATIONS: usize = 10_000;

/// Short measurement window, many samples.
fn extraction_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .sample_size(50)
}

fn bench_direct_vs_adapted(c: &mut Criterion) {
    let rows: RowMatrix<f32> = random_row_matrix_f32(DIMS, OBSERVATIONS, 42).unwrap();
    let cols: ColMatrix<f32> = rows.to_layout();

    let mut group = c.benchmark_group("extraction/dense");
    group.throughput(Throughput::Elements(OBSERVATIONS as u64));

    for (label, backend) in [("strided", &rows as &dyn clusterbridge::backend::Matrix<Value = f32, Index = u32>), ("contiguous", &cols)] {
        group.bench_function(BenchmarkId::new("direct", label), |b| {
            let mut ext = backend.dense_column();
            let mut buffer = vec![0.0f32; DIMS];
            b.iter(|| {
                let mut acc = 0.0f32;
                for i in 0..OBSERVATIONS as u32 {
                    acc += ext.fetch(i, &mut buffer)[0];
                }
                black_box(acc)
            });
        });

        let same = MatrixAdapter::<_, i32, f32>::new(backend).unwrap();
        group.bench_function(BenchmarkId::new("adapted_f32", label), |b| {
            let mut ext = same.new_extractor();
            b.iter(|| {
                let mut acc = 0.0f32;
                for i in 0..OBSERVATIONS as i32 {
                    acc += ext.get_observation(i)[0];
                }
                black_box(acc)
            });
        });

        let widened = MatrixAdapter::<_, i32, f64>::new(backend).unwrap();
        group.bench_function(BenchmarkId::new("adapted_f64", label), |b| {
            let mut ext = widened.new_extractor();
            b.iter(|| {
                let mut acc = 0.0f64;
                for i in 0..OBSERVATIONS as i32 {
                    acc += ext.get_observation(i)[0];
                }
                black_box(acc)
            });
        });
    }

    group.finish();
}

fn bench_sparse_modes(c: &mut Criterion) {
    let sparse: CompressedSparseMatrix<f64, u32> = random_sparse_f64(DIMS, OBSERVATIONS, 0.1, 7, true).unwrap();
    let adapter = MatrixAdapter::<_, i32, f64>::new(&sparse).unwrap();
    let sequence: Vec<i32> = random_sequence(OBSERVATIONS, OBSERVATIONS, 9);

    let mut group = c.benchmark_group("extraction/sparse_secondary");
    group.throughput(Throughput::Elements(OBSERVATIONS as u64));

    group.bench_function("random", |b| {
        b.iter(|| {
            let mut ext = adapter.new_extractor();
            let mut acc = 0.0;
            for i in 0..OBSERVATIONS as i32 {
                acc += ext.get_observation(i)[0];
            }
            black_box(acc)
        });
    });

    group.bench_function("consecutive", |b| {
        b.iter(|| {
            let mut ext = adapter.new_consecutive_extractor(0, OBSERVATIONS as i32);
            let mut acc = 0.0;
            for _ in 0..OBSERVATIONS {
                acc += ext.get_observation()[0];
            }
            black_box(acc)
        });
    });

    group.bench_function("indexed", |b| {
        b.iter(|| {
            let mut ext = adapter.new_indexed_extractor(&sequence);
            let mut acc = 0.0;
            for _ in 0..OBSERVATIONS {
                acc += ext.get_observation()[0];
            }
            black_box(acc)
        });
    });

    group.finish();
}

fn bench_transposed(c: &mut Criterion) {
    let rows: RowMatrix<f32> = random_row_matrix_f32(OBSERVATIONS, DIMS, 11).unwrap();
    let adapter = MatrixAdapter::<_, i32, f64>::with_params(&rows, AdapterParams::transposed()).unwrap();

    c.bench_function("extraction/transposed/consecutive", |b| {
        b.iter(|| {
            let mut ext = adapter.new_consecutive_extractor(0, OBSERVATIONS as i32);
            let mut acc = 0.0;
            for _ in 0..OBSERVATIONS {
                acc += ext.get_observation()[DIMS - 1];
            }
            black_box(acc)
        });
    });
}

criterion_group! {
    name = benches;
    config = extraction_criterion();
    targets = bench_direct_vs_adapted, bench_sparse_modes, bench_transposed
}
criterion_main!(benches);
