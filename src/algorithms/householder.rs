//! Householder reflector generation and application.
//!
//! A reflector `H = I - tau v v^T` is generated from a vector `x` so that `H x = beta e_0`.
//! The vector `v` overwrites `x` in place with `v[0] = 1` stored explicitly. The sign of
//! `beta` is chosen opposite to `x[0]` so that `x[0] - beta` never suffers cancellation.

use super::degeneracy_threshold;
use crate::blas::{Transpose, gemm, ger};
use faer::{ColMut, ColRef, Mat, MatMut, Scale, prelude::*};

/// Scalars describing a generated reflector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflector {
    /// Scaling factor of `H = I - tau v v^T`. Zero marks the identity sentinel.
    pub tau: f32,
    /// Leading entry of `H x`. Equal to `x[0]` for the sentinel.
    pub beta: f32,
}

impl Reflector {
    /// Returns `true` if the reflector is the identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.tau == 0.0
    }
}

/// Generates the reflector that maps `x` to a multiple of `e_0`, overwriting `x` with `v`.
///
/// Zero vectors, vectors whose trailing part is already zero and vectors too small to be
/// normalized safely produce the identity sentinel: `tau = 0`, `v = e_0` and
/// `beta = x[0]`. This function never fails.
pub fn make_reflector(x: ColMut<'_, f32>) -> Reflector {
    let mut x = x;
    let d = x.nrows();
    if d == 0 {
        return Reflector {
            tau: 0.0,
            beta: 0.0,
        };
    }

    let head = x[0];
    let tail_norm = x.rb().subrows(1, d - 1).norm_l2();
    let sentinel = |mut x: ColMut<'_, f32>| {
        x.rb_mut().subrows_mut(1, d - 1).fill(0.0);
        x[0] = 1.0;
        Reflector {
            tau: 0.0,
            beta: head,
        }
    };

    if tail_norm == 0.0 {
        return sentinel(x);
    }

    let norm = head.hypot(tail_norm);
    let beta = if head.is_sign_negative() { norm } else { -norm };

    let threshold = degeneracy_threshold();
    if (beta - head).abs() < threshold || beta.abs() < threshold {
        return sentinel(x);
    }

    let tau = (beta - head) / beta;
    let mut tail = x.rb_mut().subrows_mut(1, d - 1);
    tail *= Scale(1.0 / (head - beta));
    x[0] = 1.0;

    Reflector { tau, beta }
}

/// Applies `H = I - tau v v^T` from the left: `A <- H A`.
pub fn apply_reflector_left(a: MatMut<'_, f32>, v: ColRef<'_, f32>, tau: f32) {
    if tau == 0.0 || a.ncols() == 0 {
        return;
    }
    // w = A^T v
    let mut w = Mat::<f32>::zeros(a.ncols(), 1);
    gemm(
        w.as_mut(),
        0.0,
        a.rb(),
        Transpose::Yes,
        v.as_mat(),
        Transpose::No,
        1.0,
    );
    ger(a, -tau, v, w.col(0));
}

/// Applies `H = I - tau v v^T` from the right: `A <- A H`.
pub fn apply_reflector_right(a: MatMut<'_, f32>, v: ColRef<'_, f32>, tau: f32) {
    if tau == 0.0 || a.nrows() == 0 {
        return;
    }
    // w = A v
    let mut w = Mat::<f32>::zeros(a.nrows(), 1);
    gemm(
        w.as_mut(),
        0.0,
        a.rb(),
        Transpose::No,
        v.as_mat(),
        Transpose::No,
        1.0,
    );
    ger(a, -tau, w.col(0), v);
}
