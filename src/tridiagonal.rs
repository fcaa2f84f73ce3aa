//! This module defines the seam to the tridiagonal eigensolver.
//!
//! The two-stage reduction ends with a symmetric tridiagonal matrix `T`, given by its
//! diagonal and sub-diagonal. Solving `T = Z D Z^T` is a self-contained, well-conditioned
//! problem handled by an external kernel. The pipeline only relies on the contract captured
//! by the [`TridiagonalSolver`] trait:
//!
//! - eigenvalues are returned in non-decreasing order,
//! - eigenvectors are the columns of an orthonormal `n x n` matrix, column `i` belonging to
//!   eigenvalue `i`.
//!
//! [`FaerTridiagonalSolver`] implements it on top of `faer`'s self-adjoint
//! eigendecomposition, which switches to divide-and-conquer above its recursion threshold.

use crate::error::{EighError, EighErrorKind};
use faer::{Mat, Side};

/// Eigendecomposition of a symmetric tridiagonal matrix.
#[derive(Debug, Clone)]
pub struct TridiagonalEigen {
    /// Eigenvalues in non-decreasing order.
    pub eigenvalues: Vec<f32>,
    /// Orthonormal eigenvectors, column `i` belonging to `eigenvalues[i]`.
    pub eigenvectors: Mat<f32>,
}

/// Solves the symmetric tridiagonal eigenproblem.
///
/// # Example
///
/// A solver for matrices that are known to be diagonal, e.g. for testing the pipeline with
/// a stub:
///
/// ```
/// use faer::Mat;
/// use two_stage_eigh::error::EighError;
/// use two_stage_eigh::tridiagonal::{TridiagonalEigen, TridiagonalSolver};
///
/// struct DiagonalOnly;
///
/// impl TridiagonalSolver for DiagonalOnly {
///     fn solve(&self, diagonal: &[f32], _off: &[f32]) -> Result<TridiagonalEigen, EighError> {
///         let n = diagonal.len();
///         let mut order: Vec<usize> = (0..n).collect();
///         order.sort_by(|&i, &j| diagonal[i].total_cmp(&diagonal[j]));
///         Ok(TridiagonalEigen {
///             eigenvalues: order.iter().map(|&i| diagonal[i]).collect(),
///             eigenvectors: Mat::from_fn(n, n, |i, j| if order[j] == i { 1.0 } else { 0.0 }),
///         })
///     }
/// }
///
/// let eig = DiagonalOnly.solve(&[3.0, 1.0], &[0.0]).unwrap();
/// assert_eq!(eig.eigenvalues, vec![1.0, 3.0]);
/// ```
pub trait TridiagonalSolver {
    /// Computes all eigenpairs of the tridiagonal matrix with the given `diagonal`
    /// (length `n`) and `off_diagonal` (length `n - 1`).
    fn solve(&self, diagonal: &[f32], off_diagonal: &[f32])
    -> Result<TridiagonalEigen, EighError>;
}

/// Default solver backed by `faer`'s self-adjoint eigendecomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaerTridiagonalSolver;

impl TridiagonalSolver for FaerTridiagonalSolver {
    fn solve(
        &self,
        diagonal: &[f32],
        off_diagonal: &[f32],
    ) -> Result<TridiagonalEigen, EighError> {
        let n = diagonal.len();
        assert_eq!(
            off_diagonal.len(),
            n.saturating_sub(1),
            "Dimension mismatch: diagonal has {} entries but off-diagonal has {}.",
            n,
            off_diagonal.len(),
        );
        if n == 0 {
            return Ok(TridiagonalEigen {
                eigenvalues: Vec::new(),
                eigenvectors: Mat::zeros(0, 0),
            });
        }

        let t = assemble_tridiagonal(diagonal, off_diagonal);
        let evd = t
            .as_ref()
            .self_adjoint_eigen(Side::Lower)
            .map_err(|e| EighError::from(EighErrorKind::TridiagonalSolver(e)))?;

        let s = evd.S().column_vector();
        Ok(TridiagonalEigen {
            eigenvalues: (0..n).map(|i| s[i]).collect(),
            eigenvectors: evd.U().to_owned(),
        })
    }
}

/// Assembles the dense symmetric tridiagonal matrix from its diagonals.
pub fn assemble_tridiagonal(diagonal: &[f32], off_diagonal: &[f32]) -> Mat<f32> {
    let n = diagonal.len();
    let mut t = Mat::zeros(n, n);
    for (i, &d) in diagonal.iter().enumerate() {
        t[(i, i)] = d;
    }
    for (i, &e) in off_diagonal.iter().enumerate() {
        t[(i + 1, i)] = e;
        t[(i, i + 1)] = e;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eigenvalues_are_ascending() {
        let diagonal = [4.0, -1.0, 2.5, 0.0, 7.0];
        let off = [0.5, -0.3, 1.2, 0.1];
        let eig = FaerTridiagonalSolver.solve(&diagonal, &off).unwrap();
        assert!(eig.eigenvalues.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_eigenpairs_satisfy_definition() {
        let diagonal = [2.0, 2.0, 2.0, 2.0];
        let off = [-1.0, -1.0, -1.0];
        let eig = FaerTridiagonalSolver.solve(&diagonal, &off).unwrap();
        let t = assemble_tridiagonal(&diagonal, &off);
        for (j, &lambda) in eig.eigenvalues.iter().enumerate() {
            let z = eig.eigenvectors.col(j);
            let residual = (&t * z.as_mat() - z.as_mat() * faer::Scale(lambda)).norm_l2();
            assert!(residual < 1e-5, "eigenpair {j}: residual {residual}");
        }
    }

    #[test]
    fn test_single_entry() {
        let eig = FaerTridiagonalSolver.solve(&[5.0], &[]).unwrap();
        assert_eq!(eig.eigenvalues, vec![5.0]);
        assert!((eig.eigenvectors[(0, 0)].abs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_assemble_is_symmetric() {
        let t = assemble_tridiagonal(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert_eq!(t[(1, 0)], 4.0);
        assert_eq!(t[(0, 1)], 4.0);
        assert_eq!(t[(2, 1)], 5.0);
        assert_eq!(t[(2, 0)], 0.0);
    }
}
