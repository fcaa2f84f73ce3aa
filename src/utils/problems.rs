//! Generators for symmetric test matrices.
//!
//! Every generator returns a flat column-major `n x n` buffer holding a fully symmetric
//! matrix, ready to be passed to [`crate::symmetric_eigen`]. Random generators are seeded so
//! experiments are reproducible.

use crate::algorithms::householder::{apply_reflector_left, make_reflector};
use faer::{Mat, MatRef};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A dense random symmetric matrix with entries in `[-1, 1]`.
pub fn random_symmetric(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let g = Mat::from_fn(n, n, |_, _| rng.random_range(-1.0f32..1.0));
    let a = Mat::from_fn(n, n, |i, j| 0.5 * (g[(i, j)] + g[(j, i)]));
    to_column_major(a.as_ref())
}

/// The diagonal matrix `diag(values)`.
pub fn diagonal(values: &[f32]) -> Vec<f32> {
    let n = values.len();
    let a = Mat::from_fn(n, n, |i, j| if i == j { values[i] } else { 0.0 });
    to_column_major(a.as_ref())
}

/// The `n x n` identity matrix.
pub fn identity(n: usize) -> Vec<f32> {
    to_column_major(Mat::<f32>::identity(n, n).as_ref())
}

/// A dense symmetric matrix `Q diag(eigenvalues) Q^T` with a random orthogonal `Q`.
pub fn with_spectrum(eigenvalues: &[f32], seed: u64) -> Vec<f32> {
    let n = eigenvalues.len();
    let mut rng = StdRng::seed_from_u64(seed);
    let q = random_orthogonal(n, &mut rng);

    let scaled = Mat::from_fn(n, n, |i, j| q[(i, j)] * eigenvalues[j]);
    let a = &scaled * q.transpose();
    let symmetric = Mat::from_fn(n, n, |i, j| 0.5 * (a[(i, j)] + a[(j, i)]));
    to_column_major(symmetric.as_ref())
}

/// A dense matrix whose spectrum consists of three clusters of exactly repeated
/// eigenvalues, `1`, `2` and `3`.
///
/// Returns the matrix together with its exact eigenvalues in ascending order.
pub fn clustered(n: usize, seed: u64) -> (Vec<f32>, Vec<f32>) {
    let eigenvalues: Vec<f32> = (0..n).map(|i| (1 + 3 * i / n.max(1)) as f32).collect();
    (with_spectrum(&eigenvalues, seed), eigenvalues)
}

/// Eigenvalues evenly spaced in `[lo, hi]`, in ascending order.
pub fn linear_spectrum(n: usize, lo: f32, hi: f32) -> Vec<f32> {
    let step = (hi - lo) / (n.max(2) - 1) as f32;
    (0..n).map(|i| lo + step * i as f32).collect()
}

/// A random orthogonal matrix, built as a product of `n - 1` random reflectors.
fn random_orthogonal(n: usize, rng: &mut StdRng) -> Mat<f32> {
    let mut q = Mat::<f32>::identity(n, n);
    for k in 0..n.saturating_sub(1) {
        let mut v = Mat::from_fn(n - k, 1, |_, _| rng.random_range(-1.0f32..1.0));
        let reflector = make_reflector(v.as_mut().col_mut(0));
        apply_reflector_left(q.as_mut().subrows_mut(k, n - k), v.col(0), reflector.tau);
    }
    q
}

/// Copies a matrix view into a flat column-major buffer.
pub fn to_column_major(a: MatRef<'_, f32>) -> Vec<f32> {
    (0..a.ncols())
        .flat_map(|j| (0..a.nrows()).map(move |i| a[(i, j)]))
        .collect()
}
