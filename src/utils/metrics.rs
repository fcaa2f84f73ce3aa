//! Accuracy measures for a computed eigendecomposition.

use crate::solvers::Eigenpairs;
use faer::{Mat, MatRef};

/// Safety factor applied on top of the `n * eps * ||A||` error model.
const TOLERANCE_FACTOR: f32 = 32.0;

/// Frobenius norm of a flat matrix buffer.
pub fn frobenius_norm(matrix: &[f32]) -> f32 {
    matrix.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Backward error `||A - V diag(w) V^T||_F` of the decomposition of the `n x n` matrix.
///
/// # Panics
///
/// Panics if `matrix` does not hold `n * n` entries or if `eig` belongs to a different size.
pub fn reconstruction_error(matrix: &[f32], n: usize, eig: &Eigenpairs) -> f32 {
    assert_eq!(
        eig.problem_size(),
        n,
        "Dimension mismatch: decomposition is for a different problem size."
    );
    let a = MatRef::from_column_major_slice(matrix, n, n);
    let v = eig.eigenvectors_mat();
    let w = eig.eigenvalues();

    let scaled = Mat::from_fn(n, n, |i, j| v[(i, j)] * w[j]);
    let reconstructed = &scaled * v.transpose();
    (&a.to_owned() - &reconstructed).norm_l2()
}

/// Loss of orthogonality `||V^T V - I||_F` of the computed eigenvectors.
pub fn orthogonality_error(eig: &Eigenpairs) -> f32 {
    let n = eig.problem_size();
    let v = eig.eigenvectors_mat();
    (v.transpose() * v - Mat::<f32>::identity(n, n)).norm_l2()
}

/// Largest absolute difference between two eigenvalue lists.
///
/// # Panics
///
/// Panics if the lists have different lengths.
pub fn max_eigenvalue_deviation(computed: &[f32], reference: &[f32]) -> f32 {
    assert_eq!(
        computed.len(),
        reference.len(),
        "Dimension mismatch: eigenvalue lists differ in length."
    );
    computed
        .iter()
        .zip(reference)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f32::max)
}

/// Error bound `C * n * eps * max(norm, 1)` for a problem of size `n` and norm `norm`.
pub fn residual_tolerance(n: usize, norm: f32) -> f32 {
    TOLERANCE_FACTOR * n as f32 * f32::EPSILON * norm.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetric_eigen;
    use crate::utils::problems;

    #[test]
    fn test_metrics_of_exact_decomposition() {
        let a = problems::diagonal(&[3.0, 1.0, 2.0]);
        let eig = symmetric_eigen(&a, 3, None, None).unwrap();
        assert!(reconstruction_error(&a, 3, &eig) < 1e-6);
        assert!(orthogonality_error(&eig) < 1e-6);
        assert!(max_eigenvalue_deviation(eig.eigenvalues(), &[1.0, 2.0, 3.0]) < 1e-6);
    }

    #[test]
    fn test_frobenius_norm() {
        assert_eq!(frobenius_norm(&[3.0, 0.0, 0.0, 4.0]), 5.0);
        assert_eq!(frobenius_norm(&[]), 0.0);
    }

    #[test]
    fn test_deviation_picks_the_largest_gap() {
        assert_eq!(max_eigenvalue_deviation(&[1.0, 2.0, 3.0], &[1.0, 2.5, 2.75]), 0.5);
    }

    #[test]
    fn test_tolerance_scales_with_size_and_norm() {
        let base = residual_tolerance(10, 1.0);
        assert_eq!(residual_tolerance(10, 0.01), base);
        assert!((residual_tolerance(20, 1.0) - 2.0 * base).abs() < 1e-12);
        assert!((residual_tolerance(10, 4.0) - 4.0 * base).abs() < 1e-12);
    }
}
