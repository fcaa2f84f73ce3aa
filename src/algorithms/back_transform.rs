//! Back-transformation of tridiagonal eigenvectors to eigenvectors of the original matrix.
//!
//! With `A = Q1 B Q1^T` (band reduction), `B = Q2 T Q2^T` (bulge chasing) and
//! `T = Z D Z^T`, the eigenvectors of `A` are `Q1 Q2 Z`. Both `Q2 = H_1 H_2 ... H_R` and
//! `Q1 = Q_0 Q_1 ... Q_{P-1}` are products in generation order, so their factors are applied
//! to `Z` last-generated first.

use super::{BandReduction, BulgeChase, compact_wy::apply_block_left, householder};
use crate::blas::Transpose;
use faer::{MatMut, prelude::*};

/// Computes `Z <- Q2 Z` by replaying the bulge-chasing reflectors in reverse.
pub fn apply_bulge_reflectors(z: MatMut<'_, f32>, chase: &BulgeChase) {
    let mut z = z;
    for reflector in chase.reflectors().iter().rev() {
        householder::apply_reflector_left(
            z.rb_mut().subrows_mut(reflector.row, reflector.len),
            chase.vector(reflector),
            reflector.tau,
        );
    }
}

/// Computes `Z <- Q1 Z` by applying the band-reduction blocks in reverse panel order.
pub fn apply_band_blocks(z: MatMut<'_, f32>, reduction: &BandReduction) {
    let mut z = z;
    for block in reduction.blocks.iter().rev() {
        apply_block_left(
            z.rb_mut().subrows_mut(block.row_offset, block.rows()),
            block.basis.as_ref(),
            block.factor.as_ref(),
            Transpose::No,
        );
    }
}

/// Computes `Z <- Q1 Q2 Z`.
pub fn back_transform(z: MatMut<'_, f32>, reduction: &BandReduction, chase: &BulgeChase) {
    let mut z = z;
    apply_bulge_reflectors(z.rb_mut(), chase);
    apply_band_blocks(z, reduction);
}
