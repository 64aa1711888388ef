//! Small k-means written purely against the clustering matrix interface.
//!
//! Every access goes through the three consumer extractor kinds, so running
//! it over a `MatrixAdapter` and over a `SimpleMatrix` holding the same
//! values must give identical results.

use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

use clusterbridge::Index;
use clusterbridge::consumer::{ConsecutiveAccessExtractor, IndexedAccessExtractor, Matrix, RandomAccessExtractor};

/// Outcome of one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Cluster of each observation.
    pub clusters: Vec<usize>,
    /// `k x num_dimensions` centers, center by center.
    pub centers: Vec<f64>,
    /// Observations per cluster.
    pub sizes: Vec<usize>,
    /// Refinement iterations performed.
    pub iterations: usize,
}

/// Center initialization strategies.
#[derive(Debug, Clone, Copy)]
pub enum Init {
    /// `k` distinct observations chosen uniformly.
    Random { seed: u64 },
    /// k-means++ seeding.
    PlusPlus { seed: u64 },
}

/// Refinement strategies.
#[derive(Debug, Clone, Copy)]
pub enum Refine {
    /// Full-batch Lloyd iterations until assignments stop changing.
    Lloyd { max_iterations: usize },
    /// Mini-batch updates over sampled observations.
    MiniBatch {
        batch_size: usize,
        max_iterations: usize,
        seed: u64,
    },
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn closest(point: &[f64], centers: &[f64], ndim: usize) -> (usize, f64) {
    centers
        .chunks_exact(ndim)
        .enumerate()
        .map(|(c, center)| (c, squared_distance(point, center)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

fn full_block<M: Matrix<Data = f64>>(matrix: &M) -> M::ConsecutiveExtractor<'_> {
    matrix.new_consecutive_extractor(M::Index::from_usize(0), matrix.num_observations())
}

/// Pick initial centers.
pub fn initialize<M: Matrix<Data = f64>>(matrix: &M, k: usize, init: Init) -> Vec<f64> {
    let n = matrix.num_observations().to_position();
    let ndim = matrix.num_dimensions();
    assert!(k <= n);

    match init {
        Init::Random { seed } => {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let chosen: Vec<M::Index> = rand::seq::index::sample(&mut rng, n, k)
                .into_iter()
                .map(M::Index::from_usize)
                .collect();
            let mut ext = matrix.new_indexed_extractor(&chosen);
            let mut centers = Vec::with_capacity(k * ndim);
            for _ in 0..k {
                centers.extend_from_slice(ext.get_observation());
            }
            centers
        }
        Init::PlusPlus { seed } => {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let mut random = matrix.new_extractor();
            let first = rng.gen_range(0..n);
            let mut centers = random.get_observation(M::Index::from_usize(first)).to_vec();

            let mut weights = vec![f64::INFINITY; n];
            for c in 1..k {
                let latest = &centers[(c - 1) * ndim..c * ndim];
                let mut ext = full_block(matrix);
                for w in weights.iter_mut() {
                    *w = w.min(squared_distance(ext.get_observation(), latest));
                }

                let total: f64 = weights.iter().sum();
                let mut target = rng.r#gen::<f64>() * total;
                let mut pick = n - 1;
                for (i, &w) in weights.iter().enumerate() {
                    if target < w {
                        pick = i;
                        break;
                    }
                    target -= w;
                }
                centers.extend_from_slice(random.get_observation(M::Index::from_usize(pick)));
            }
            centers
        }
    }
}

fn assign_all<M: Matrix<Data = f64>>(matrix: &M, centers: &[f64], clusters: &mut [usize]) -> bool {
    let ndim = matrix.num_dimensions();
    let mut ext = full_block(matrix);
    let mut changed = false;
    for slot in clusters.iter_mut() {
        let (best, _) = closest(ext.get_observation(), centers, ndim);
        changed |= *slot != best;
        *slot = best;
    }
    changed
}

fn sizes_of(clusters: &[usize], k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for &c in clusters {
        sizes[c] += 1;
    }
    sizes
}

/// Refine `centers` over `matrix`.
pub fn refine<M: Matrix<Data = f64>>(matrix: &M, mut centers: Vec<f64>, strategy: Refine) -> Clustering {
    let n = matrix.num_observations().to_position();
    let ndim = matrix.num_dimensions();
    let k = centers.len() / ndim.max(1);
    let mut clusters = vec![usize::MAX; n];

    match strategy {
        Refine::Lloyd { max_iterations } => {
            let mut iterations = 0;
            while iterations < max_iterations {
                iterations += 1;
                if !assign_all(matrix, &centers, &mut clusters) {
                    break;
                }

                let mut sums = vec![0.0; k * ndim];
                let sizes = sizes_of(&clusters, k);
                let mut ext = full_block(matrix);
                for &c in &clusters {
                    let point = ext.get_observation();
                    for (s, v) in sums[c * ndim..(c + 1) * ndim].iter_mut().zip(point) {
                        *s += v;
                    }
                }
                for c in 0..k {
                    if sizes[c] > 0 {
                        for d in 0..ndim {
                            centers[c * ndim + d] = sums[c * ndim + d] / sizes[c] as f64;
                        }
                    }
                }
            }
            let sizes = sizes_of(&clusters, k);
            Clustering {
                clusters,
                centers,
                sizes,
                iterations,
            }
        }
        Refine::MiniBatch {
            batch_size,
            max_iterations,
            seed,
        } => {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let mut counts = vec![0usize; k];
            let mut iterations = 0;
            let mut previous: Vec<usize> = Vec::new();

            while iterations < max_iterations {
                iterations += 1;
                let batch: Vec<M::Index> = (0..batch_size)
                    .map(|_| M::Index::from_usize(rng.gen_range(0..n)))
                    .collect();

                let mut ext = matrix.new_indexed_extractor(&batch);
                let mut assigned = Vec::with_capacity(batch_size);
                for _ in 0..batch_size {
                    let point = ext.get_observation();
                    let (best, _) = closest(point, &centers, ndim);
                    counts[best] += 1;
                    let rate = 1.0 / counts[best] as f64;
                    for (c, v) in centers[best * ndim..(best + 1) * ndim].iter_mut().zip(point) {
                        *c += rate * (v - *c);
                    }
                    assigned.push(best);
                }

                if assigned == previous {
                    break;
                }
                previous = assigned;
            }

            assign_all(matrix, &centers, &mut clusters);
            let sizes = sizes_of(&clusters, k);
            Clustering {
                clusters,
                centers,
                sizes,
                iterations,
            }
        }
    }
}

/// Initialize then refine.
pub fn kmeans<M: Matrix<Data = f64>>(matrix: &M, k: usize, init: Init, refine_with: Refine) -> Clustering {
    let centers = initialize(matrix, k, init);
    refine(matrix, centers, refine_with)
}
