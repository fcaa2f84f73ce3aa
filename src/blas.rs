//! BLAS-level primitives consumed by the reduction stages.
//!
//! The blocked algorithms in [`crate::algorithms`] are expressed in terms of two kernels:
//! a general matrix multiply (GEMM) and a rank-1 update (GER). Both operate on `faer`
//! views ([`MatRef`], [`MatMut`], [`ColRef`]), which carry an offset, strides and
//! dimensions. Sub-matrices are therefore passed around without copies and every access
//! is bounds-checked by the view itself.
//!
//! The actual arithmetic is delegated to [`faer::linalg::matmul::matmul`], which selects
//! SIMD kernels for the target at runtime. All calls are sequential ([`Par::Seq`]); the
//! orchestration layer never overlaps stages.

use faer::{Accum, ColRef, MatMut, MatRef, Par, Scale, linalg::matmul::matmul};

/// Whether an operand enters a product as-is or transposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transpose {
    /// Use the operand as stored.
    No,
    /// Use the transpose of the operand.
    Yes,
}

impl Transpose {
    /// Returns `op(m)` as a view; transposition only swaps the strides.
    #[inline]
    pub fn apply<'a>(self, m: MatRef<'a, f32>) -> MatRef<'a, f32> {
        match self {
            Transpose::No => m,
            Transpose::Yes => m.transpose(),
        }
    }
}

/// Computes `C <- alpha * op(A) * op(B) + beta * C`.
///
/// `op(A)` must be `M x K`, `op(B)` must be `K x N` and `C` must be `M x N`. When `beta`
/// is zero the previous contents of `C` are never read, so `C` may hold garbage
/// (including NaN) on entry.
///
/// # Panics
///
/// Panics if the operand dimensions are incompatible.
pub fn gemm(
    c: MatMut<'_, f32>,
    beta: f32,
    a: MatRef<'_, f32>,
    trans_a: Transpose,
    b: MatRef<'_, f32>,
    trans_b: Transpose,
    alpha: f32,
) {
    let mut c = c;
    let lhs = trans_a.apply(a);
    let rhs = trans_b.apply(b);

    assert_eq!(
        lhs.ncols(),
        rhs.nrows(),
        "Dimension mismatch: op(A) has {} columns but op(B) has {} rows.",
        lhs.ncols(),
        rhs.nrows(),
    );
    assert!(
        c.nrows() == lhs.nrows() && c.ncols() == rhs.ncols(),
        "Dimension mismatch: C is {}x{} but op(A) * op(B) is {}x{}.",
        c.nrows(),
        c.ncols(),
        lhs.nrows(),
        rhs.ncols(),
    );

    let accum = if beta == 0.0 {
        Accum::Replace
    } else {
        if beta != 1.0 {
            c *= Scale(beta);
        }
        Accum::Add
    };

    matmul(c, accum, lhs, rhs, alpha, Par::Seq);
}

/// Computes the rank-1 update `A <- A + alpha * x * y^T` in place.
///
/// # Panics
///
/// Panics if `A` is not `len(x) x len(y)`.
pub fn ger(a: MatMut<'_, f32>, alpha: f32, x: ColRef<'_, f32>, y: ColRef<'_, f32>) {
    assert!(
        a.nrows() == x.nrows() && a.ncols() == y.nrows(),
        "Dimension mismatch: A is {}x{} but x * y^T is {}x{}.",
        a.nrows(),
        a.ncols(),
        x.nrows(),
        y.nrows(),
    );
    matmul(
        a,
        Accum::Add,
        x.as_mat(),
        y.as_mat().transpose(),
        alpha,
        Par::Seq,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::{Mat, mat};

    #[test]
    fn test_gemm_transpose_flags() {
        let a: Mat<f32> = mat![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let b: Mat<f32> = mat![[1.0, 0.0, 2.0], [0.0, 1.0, 1.0]];

        // C = A^T * B^T is 2x2.
        let mut c = Mat::<f32>::zeros(2, 2);
        gemm(
            c.as_mut(),
            0.0,
            a.as_ref(),
            Transpose::Yes,
            b.as_ref(),
            Transpose::Yes,
            1.0,
        );
        let expected = a.as_ref().transpose() * b.as_ref().transpose();
        assert_eq!(c, expected);
    }

    #[test]
    fn test_gemm_scales_existing_contents() {
        let a: Mat<f32> = mat![[1.0, 0.0], [0.0, 1.0]];
        let b: Mat<f32> = mat![[2.0, 0.0], [0.0, 2.0]];
        let mut c: Mat<f32> = mat![[1.0, 1.0], [1.0, 1.0]];

        // C = -1 * A * B + 3 * C
        gemm(
            c.as_mut(),
            3.0,
            a.as_ref(),
            Transpose::No,
            b.as_ref(),
            Transpose::No,
            -1.0,
        );
        let expected: Mat<f32> = mat![[1.0, 3.0], [3.0, 1.0]];
        assert_eq!(c, expected);
    }

    #[test]
    fn test_gemm_on_strided_submatrix() {
        let mut big = Mat::<f32>::zeros(4, 4);
        let a: Mat<f32> = mat![[1.0, 2.0], [3.0, 4.0]];
        let id = Mat::<f32>::identity(2, 2);

        // Write into the lower-right 2x2 block only.
        gemm(
            big.as_mut().submatrix_mut(2, 2, 2, 2),
            0.0,
            a.as_ref(),
            Transpose::No,
            id.as_ref(),
            Transpose::No,
            1.0,
        );
        assert_eq!(big[(2, 2)], 1.0);
        assert_eq!(big[(3, 3)], 4.0);
        assert_eq!(big[(0, 0)], 0.0);
        assert_eq!(big[(1, 3)], 0.0);
    }

    #[test]
    fn test_ger_rank_one_update() {
        let mut a = Mat::<f32>::zeros(2, 3);
        let x: Mat<f32> = mat![[1.0], [2.0]];
        let y: Mat<f32> = mat![[1.0], [0.0], [-1.0]];

        ger(a.as_mut(), 2.0, x.col(0), y.col(0));
        let expected: Mat<f32> = mat![[2.0, 0.0, -2.0], [4.0, 0.0, -4.0]];
        assert_eq!(a, expected);
    }

    #[test]
    #[should_panic(expected = "Dimension mismatch")]
    fn test_gemm_dimension_mismatch_panic() {
        let a = Mat::<f32>::zeros(2, 3);
        let b = Mat::<f32>::zeros(2, 3);
        let mut c = Mat::<f32>::zeros(2, 3);
        gemm(
            c.as_mut(),
            0.0,
            a.as_ref(),
            Transpose::No,
            b.as_ref(),
            Transpose::No,
            1.0,
        );
    }
}
