//! Compact WY representation of a block of Householder reflectors.
//!
//! Given reflectors `H_j = I - tau_j v_j v_j^T` stored as the columns of `V`, there is a
//! unique upper-triangular `T` such that
//!
//! ```text
//! Q = H_0 H_1 ... H_{k-1} = I - V T V^T.
//! ```
//!
//! With `T` at hand, `Q` (or `Q^T`) is applied to a matrix with three matrix products
//! instead of `k` rank-1 updates.
//!
//! `T` is accumulated from the Gram matrix `G = V^T V` in sub-blocks of `small_block_size`
//! columns. Inside a sub-block the columns follow the recurrence
//! `T[.., j] = -tau_j T[.., ..j] G[..j, j]`; each finished sub-block is then coupled to all
//! earlier columns with `T_12 = -T_11 G_12 T_22`. The last sub-block may be narrower than
//! the others.

use crate::blas::{Transpose, gemm};
use faer::{Mat, MatMut, MatRef, prelude::*};

/// Computes the upper-triangular factor `T` of the block reflector `I - V T V^T`.
///
/// `basis` holds the reflector vectors as columns (explicit unit leading entries), `taus`
/// their scaling factors. Identity sentinels (`tau == 0`) produce a zero row and column in
/// `T`, so they remain exact no-ops inside the block.
///
/// # Panics
///
/// Panics if `taus.len()` differs from the number of columns of `basis`.
pub fn block_reflector_factor(
    basis: MatRef<'_, f32>,
    taus: &[f32],
    small_block_size: usize,
) -> Mat<f32> {
    let k = basis.ncols();
    assert_eq!(
        taus.len(),
        k,
        "Dimension mismatch: {} scaling factors for {} reflectors.",
        taus.len(),
        k,
    );
    let small_block_size = small_block_size.max(1);

    let mut gram = Mat::<f32>::zeros(k, k);
    gemm(
        gram.as_mut(),
        0.0,
        basis,
        Transpose::Yes,
        basis,
        Transpose::No,
        1.0,
    );

    let mut t = Mat::<f32>::zeros(k, k);
    let mut start = 0;
    while start < k {
        let width = small_block_size.min(k - start);

        for j in start..start + width {
            let tau = taus[j];
            t[(j, j)] = tau;
            if tau == 0.0 || j == start {
                continue;
            }
            let len = j - start;
            let (done, mut rest) = t.as_mut().split_at_col_mut(j);
            gemm(
                rest.rb_mut().submatrix_mut(start, 0, len, 1),
                0.0,
                done.rb().submatrix(start, start, len, len),
                Transpose::No,
                gram.as_ref().submatrix(start, j, len, 1),
                Transpose::No,
                -tau,
            );
        }

        if start > 0 {
            // T_12 = -T_11 (G_12 T_22)
            let mut coupling = Mat::<f32>::zeros(start, width);
            gemm(
                coupling.as_mut(),
                0.0,
                gram.as_ref().submatrix(0, start, start, width),
                Transpose::No,
                t.as_ref().submatrix(start, start, width, width),
                Transpose::No,
                1.0,
            );
            let (done, rest) = t.as_mut().split_at_col_mut(start);
            gemm(
                rest.submatrix_mut(0, 0, start, width),
                0.0,
                done.rb().submatrix(0, 0, start, start),
                Transpose::No,
                coupling.as_ref(),
                Transpose::No,
                -1.0,
            );
        }

        start += width;
    }

    t
}

/// Applies the block reflector from the left: `C <- (I - V op(T) V^T) C`.
///
/// With [`Transpose::No`] this computes `Q C`, with [`Transpose::Yes`] it computes `Q^T C`.
pub fn apply_block_left(
    c: MatMut<'_, f32>,
    basis: MatRef<'_, f32>,
    factor: MatRef<'_, f32>,
    trans: Transpose,
) {
    let k = basis.ncols();
    if k == 0 || c.ncols() == 0 {
        return;
    }
    let mut c = c;

    let mut w = Mat::<f32>::zeros(k, c.ncols());
    gemm(w.as_mut(), 0.0, basis, Transpose::Yes, c.rb(), Transpose::No, 1.0);
    let mut tw = Mat::<f32>::zeros(k, c.ncols());
    gemm(tw.as_mut(), 0.0, factor, trans, w.as_ref(), Transpose::No, 1.0);
    gemm(c.rb_mut(), 1.0, basis, Transpose::No, tw.as_ref(), Transpose::No, -1.0);
}

/// Applies the block reflector from the right: `C <- C (I - V op(T) V^T)`.
///
/// With [`Transpose::No`] this computes `C Q`, with [`Transpose::Yes`] it computes `C Q^T`.
pub fn apply_block_right(
    c: MatMut<'_, f32>,
    basis: MatRef<'_, f32>,
    factor: MatRef<'_, f32>,
    trans: Transpose,
) {
    let k = basis.ncols();
    if k == 0 || c.nrows() == 0 {
        return;
    }
    let mut c = c;

    let mut w = Mat::<f32>::zeros(c.nrows(), k);
    gemm(w.as_mut(), 0.0, c.rb(), Transpose::No, basis, Transpose::No, 1.0);
    let mut wt = Mat::<f32>::zeros(c.nrows(), k);
    gemm(wt.as_mut(), 0.0, w.as_ref(), Transpose::No, factor, trans, 1.0);
    gemm(c.rb_mut(), 1.0, wt.as_ref(), Transpose::No, basis, Transpose::Yes, -1.0);
}

/// Applies the block reflector to both sides of a symmetric matrix: `A <- Q^T A Q`.
///
/// `a` must be square, symmetric and stored in full. The update is carried out as a
/// symmetric rank-2k correction:
///
/// ```text
/// X = A V T
/// Y = X - 1/2 V (T^T V^T X)
/// A <- A - V Y^T - Y V^T
/// ```
pub fn apply_block_two_sided(
    a: MatMut<'_, f32>,
    basis: MatRef<'_, f32>,
    factor: MatRef<'_, f32>,
) {
    let k = basis.ncols();
    let m = a.nrows();
    assert_eq!(m, a.ncols(), "Dimension mismatch: A must be square.");
    if k == 0 || m == 0 {
        return;
    }
    let mut a = a;

    let mut av = Mat::<f32>::zeros(m, k);
    gemm(av.as_mut(), 0.0, a.rb(), Transpose::No, basis, Transpose::No, 1.0);
    let mut y = Mat::<f32>::zeros(m, k);
    gemm(y.as_mut(), 0.0, av.as_ref(), Transpose::No, factor, Transpose::No, 1.0);

    let mut vtx = Mat::<f32>::zeros(k, k);
    gemm(vtx.as_mut(), 0.0, basis, Transpose::Yes, y.as_ref(), Transpose::No, 1.0);
    let mut z = Mat::<f32>::zeros(k, k);
    gemm(z.as_mut(), 0.0, factor, Transpose::Yes, vtx.as_ref(), Transpose::No, 1.0);

    gemm(y.as_mut(), 1.0, basis, Transpose::No, z.as_ref(), Transpose::No, -0.5);

    gemm(a.rb_mut(), 1.0, basis, Transpose::No, y.as_ref(), Transpose::Yes, -1.0);
    gemm(a.rb_mut(), 1.0, y.as_ref(), Transpose::No, basis, Transpose::Yes, -1.0);
}
