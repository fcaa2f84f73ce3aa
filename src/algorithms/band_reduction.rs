//! Blocked reduction of a dense symmetric matrix to band form.
//!
//! The matrix is processed in panels of `block_size` columns. For the panel starting at
//! column `j`, the rows below the band (`j + block_size..n`) are QR-factorized with
//! Householder reflectors, leaving an upper-triangular block that becomes the outermost
//! diagonals of the band. The reflectors are gathered into a compact WY block and applied to
//! both sides of the trailing matrix in one symmetric rank-2k update.
//!
//! The working matrix is kept in full symmetric storage throughout. Entries eliminated by a
//! panel are zeroed explicitly in both triangles, so the result is an exact band matrix.

use super::{
    BandReduction, ReflectorBlock,
    compact_wy::{apply_block_two_sided, block_reflector_factor},
    householder::{apply_reflector_left, make_reflector},
};
use faer::{Mat, MatMut, prelude::*};

/// Reduces the symmetric matrix `a` in place to a band matrix of bandwidth `block_size`.
///
/// Returns the reflector blocks in panel order. Back-transformation must replay them in
/// reverse. When `block_size >= n - 1` the matrix already is a band matrix and no block is
/// produced.
///
/// # Panics
///
/// Panics if `a` is not square or if `block_size` is zero.
pub fn reduce_to_band(
    a: MatMut<'_, f32>,
    block_size: usize,
    small_block_size: usize,
) -> BandReduction {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "Dimension mismatch: A must be square.");
    assert!(block_size > 0, "Invalid input parameter: block size must be positive.");
    let mut a = a;
    let mut blocks = Vec::new();

    let mut panel_start = 0;
    while panel_start + block_size + 1 < n {
        let row_offset = panel_start + block_size;
        let m = n - row_offset;
        let k = block_size.min(m - 1);

        let (basis, taus) = factor_panel(
            a.rb_mut().submatrix_mut(row_offset, panel_start, m, block_size),
            k,
        );
        let factor = block_reflector_factor(basis.as_ref(), &taus, small_block_size);

        // Mirror the reduced panel into the upper triangle.
        {
            let (top, bottom) = a.rb_mut().split_at_row_mut(row_offset);
            top.submatrix_mut(panel_start, row_offset, block_size, m)
                .copy_from(bottom.rb().submatrix(0, panel_start, m, block_size).transpose());
        }

        apply_block_two_sided(
            a.rb_mut().submatrix_mut(row_offset, row_offset, m, m),
            basis.as_ref(),
            factor.as_ref(),
        );

        log::trace!(
            "Band reduction: panel at column {panel_start} produced {k} reflectors over {m} rows."
        );
        blocks.push(ReflectorBlock {
            panel_start,
            row_offset,
            basis,
            factor,
        });
        panel_start += block_size;
    }

    BandReduction {
        bandwidth: block_size,
        blocks,
    }
}

/// QR-factorizes the first `k` columns of `panel` in place with unblocked Householder steps.
///
/// On return the panel holds `R` in its upper triangle and zeros below, every remaining
/// column has been updated by all `k` reflectors, and the reflector vectors are returned as
/// a unit lower-trapezoidal basis together with their scaling factors.
fn factor_panel(panel: MatMut<'_, f32>, k: usize) -> (Mat<f32>, Vec<f32>) {
    let m = panel.nrows();
    let mut panel = panel;
    let mut basis = Mat::<f32>::zeros(m, k);
    let mut taus = Vec::with_capacity(k);

    for p in 0..k {
        let (left, right) = panel.rb_mut().split_at_col_mut(p + 1);
        let mut column = left.col_mut(p).subrows_mut(p, m - p);

        let reflector = make_reflector(column.rb_mut());
        apply_reflector_left(right.subrows_mut(p, m - p), column.rb(), reflector.tau);

        basis
            .as_mut()
            .col_mut(p)
            .subrows_mut(p, m - p)
            .copy_from(column.rb());
        taus.push(reflector.tau);

        column.rb_mut().subrows_mut(1, m - p - 1).fill(0.0);
        column[0] = reflector.beta;
    }

    (basis, taus)
}
