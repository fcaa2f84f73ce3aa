//! Reduction of a symmetric band matrix to tridiagonal form by bulge chasing.
//!
//! Sweep `i` reduces column `i` to tridiagonal form. Its first reflector acts on the rows
//! `i + 1 .. i + 1 + b` and annihilates column `i` below the sub-diagonal. Applying that
//! reflector on the right fills a triangle just outside the band (the bulge). The next
//! reflector is generated from the first column of the previous window, acting on the `b`
//! rows that follow the window, and annihilates that column below the band. This pushes a
//! new bulge `b` rows further down; the chase stops when the window runs off the matrix.
//!
//! Only the first column of each bulge is annihilated in a sweep. The remainder sits exactly
//! where the windows of the following sweep pass, so fill never extends more than `2b` from
//! the diagonal. Every reflector is applied to a column range covering that margin.
//!
//! Reflectors are recorded in generation order together with the first row they act on, so
//! back-transformation can replay them without reconstructing the chase pattern.

use super::{
    BulgeChase,
    householder::{apply_reflector_left, apply_reflector_right, make_reflector},
};
use faer::{Mat, MatMut, prelude::*};

/// Reduces the symmetric band matrix `a` (bandwidth `bandwidth`) in place to tridiagonal
/// form and returns the tridiagonal together with the recorded reflectors.
///
/// A bandwidth of 1 (or a matrix of size at most 2) is already tridiagonal; the diagonals are
/// read directly and no reflector is recorded. Identity sentinels are never recorded.
///
/// # Panics
///
/// Panics if `a` is not square or if `bandwidth` is zero.
pub fn chase_bulges(a: MatMut<'_, f32>, bandwidth: usize) -> BulgeChase {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "Dimension mismatch: A must be square.");
    assert!(bandwidth > 0, "Invalid input parameter: bandwidth must be positive.");
    let mut a = a;
    let mut chase = BulgeChase::default();

    if bandwidth > 1 && n > 2 {
        let b = bandwidth.min(n - 1);
        for sweep in 0..n - 2 {
            let mut column = sweep;
            let mut start = sweep + 1;
            while start < n {
                let len = b.min(n - start);
                if len < 2 {
                    break;
                }
                eliminate(a.rb_mut(), &mut chase, sweep, column, start, len, b);
                column = start;
                start += len;
            }
        }
    }

    chase.extract_tridiagonal(a.rb());
    chase
}

/// Annihilates `a[start + 1 .. start + len, column]` with one reflector acting on the rows
/// (and columns) `start .. start + len`, applied to both sides of `a`.
fn eliminate(
    a: MatMut<'_, f32>,
    chase: &mut BulgeChase,
    sweep: usize,
    column: usize,
    start: usize,
    len: usize,
    bandwidth: usize,
) {
    let n = a.nrows();
    let mut a = a;

    let mut v = Mat::<f32>::zeros(len, 1);
    v.as_mut()
        .col_mut(0)
        .copy_from(a.rb().col(column).subrows(start, len));
    let reflector = make_reflector(v.as_mut().col_mut(0));
    if reflector.is_identity() {
        return;
    }

    let lo = start.saturating_sub(2 * bandwidth);
    let hi = (start + len + 2 * bandwidth).min(n);

    apply_reflector_left(
        a.rb_mut().submatrix_mut(start, lo, len, hi - lo),
        v.col(0),
        reflector.tau,
    );
    apply_reflector_right(
        a.rb_mut().submatrix_mut(lo, start, hi - lo, len),
        v.col(0),
        reflector.tau,
    );

    // Store the eliminated column exactly, in both triangles.
    for i in 0..len {
        let value = if i == 0 { reflector.beta } else { 0.0 };
        a[(start + i, column)] = value;
        a[(column, start + i)] = value;
    }

    chase.push(sweep, start, reflector.tau, v.col(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::householder::apply_reflector_left;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn random_band(n: usize, b: usize, seed: u64) -> Mat<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        let g = Mat::from_fn(n, n, |_, _| rng.random_range(-1.0f32..1.0));
        Mat::from_fn(n, n, |i, j| {
            if i.abs_diff(j) <= b {
                0.5 * (g[(i, j)] + g[(j, i)])
            } else {
                0.0
            }
        })
    }

    fn tridiagonal(chase: &BulgeChase) -> Mat<f32> {
        let n = chase.diagonal.len();
        Mat::from_fn(n, n, |i, j| {
            if i == j {
                chase.diagonal[i]
            } else if i == j + 1 {
                chase.off_diagonal[j]
            } else if j == i + 1 {
                chase.off_diagonal[i]
            } else {
                0.0
            }
        })
    }

    /// Rebuilds `Q2 T Q2^T` with `Q2 = H_1 H_2 ... H_R`.
    fn reconstruct(chase: &BulgeChase) -> Mat<f32> {
        let n = chase.diagonal.len();
        let mut q = Mat::<f32>::identity(n, n);
        for r in chase.reflectors().iter().rev() {
            apply_reflector_left(
                q.as_mut().subrows_mut(r.row, r.len),
                chase.vector(r),
                r.tau,
            );
        }
        &q * tridiagonal(chase) * q.transpose()
    }

    #[test]
    fn test_reduces_band_to_tridiagonal() {
        for (n, b) in [(10, 2), (16, 3), (25, 4), (30, 8), (9, 8), (7, 6)] {
            let band = random_band(n, b, (n * 31 + b) as u64);
            let mut work = band.clone();
            let chase = chase_bulges(work.as_mut(), b);

            for j in 0..n {
                for i in j + 2..n {
                    assert!(
                        work[(i, j)].abs() < 1e-4,
                        "n={n}, b={b}: entry ({i}, {j}) = {}",
                        work[(i, j)]
                    );
                }
            }

            let err = (&reconstruct(&chase) - &band).norm_l2() / band.norm_l2();
            assert!(err < 1e-5, "n={n}, b={b}: relative error {err}");
        }
    }

    #[test]
    fn test_reflectors_record_positions_in_generation_order() {
        let band = random_band(12, 3, 4);
        let mut work = band.clone();
        let chase = chase_bulges(work.as_mut(), 3);

        let reflectors = chase.reflectors();
        assert!(!reflectors.is_empty());
        // The first reflector of sweep 0 acts right below the diagonal.
        assert_eq!(reflectors[0].sweep, 0);
        assert_eq!(reflectors[0].row, 1);
        assert_eq!(reflectors[0].len, 3);
        assert!(reflectors.windows(2).all(|w| w[0].sweep <= w[1].sweep));
        for r in reflectors {
            assert!(r.row + r.len <= 12);
            assert_eq!(chase.vector(r)[0], 1.0);
        }
    }

    #[test]
    fn test_tridiagonal_input_is_untouched() {
        let band = random_band(8, 1, 3);
        let mut work = band.clone();
        let chase = chase_bulges(work.as_mut(), 1);
        assert!(chase.reflectors().is_empty());
        assert_eq!(work, band);
        assert_eq!(chase.diagonal.len(), 8);
        assert_eq!(chase.off_diagonal.len(), 7);
        assert_eq!(chase.off_diagonal[3], band[(4, 3)]);
    }

    #[test]
    fn test_diagonal_input_records_nothing() {
        let n = 9;
        let a = Mat::from_fn(n, n, |i, j| if i == j { (i + 1) as f32 } else { 0.0 });
        let mut work = a.clone();
        let chase = chase_bulges(work.as_mut(), 4);
        assert!(chase.reflectors().is_empty());
        let expected: Vec<f32> = (1..=n).map(|i| i as f32).collect();
        assert_eq!(chase.diagonal, expected);
        assert!(chase.off_diagonal.iter().all(|&e| e == 0.0));
    }
}
