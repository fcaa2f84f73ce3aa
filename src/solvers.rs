//! This module provides the high-level API for the symmetric eigendecomposition.
//!
//! [`symmetric_eigen`] takes a flat matrix buffer and optional block-size overrides, and
//! runs the whole pipeline:
//!
//! ```text
//! Start -> BlockSizeChosen -> BandReduced -> [BulgeChased] -> TridiagonalSolved
//!       -> [BackTransformedBulge] -> BackTransformedBand -> Done
//! ```
//!
//! The bracketed stages are skipped when the block size is 1, because the band reduction
//! then already produces a tridiagonal matrix. A `1 x 1` problem is answered in closed form
//! without entering any stage.
//!
//! All working storage (the matrix copy and every reflector record) is local to one call.

use crate::{
    algorithms::{
        BandReduction, BulgeChase, back_transform, band_reduction::reduce_to_band,
        bulge_chasing::chase_bulges,
    },
    error::{EighError, EighErrorKind},
    tridiagonal::{FaerTridiagonalSolver, TridiagonalSolver},
};
use faer::{Mat, MatMut, MatRef, prelude::*};
use serde::Serialize;

/// Largest block size picked by the heuristic.
const MAX_BLOCK_SIZE: usize = 32;
/// Block sizes picked by the heuristic are multiples of this value.
const BLOCK_SIZE_GRANULE: usize = 8;

/// Validated blocking parameters for one decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EighParams {
    block_size: usize,
    small_block_size: usize,
}

impl EighParams {
    /// Starts a builder with no overrides.
    pub fn builder() -> EighParamsBuilder {
        EighParamsBuilder::default()
    }

    /// Heuristic parameters for a problem of size `n` (`n >= 1`).
    pub fn heuristic(n: usize) -> Self {
        let block_size = default_block_size(n);
        Self {
            block_size,
            small_block_size: default_small_block_size(block_size),
        }
    }

    /// Bandwidth of the intermediate band matrix.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Width of the sub-blocks used when accumulating the compact WY factor.
    pub fn small_block_size(&self) -> usize {
        self.small_block_size
    }
}

/// Builder for [`EighParams`]; omitted values are chosen by the block-size heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EighParamsBuilder {
    block_size: Option<usize>,
    small_block_size: Option<usize>,
}

impl EighParamsBuilder {
    /// Overrides the block size (bandwidth of the intermediate band matrix).
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size);
        self
    }

    /// Overrides the sub-block width of the compact WY accumulation.
    pub fn small_block_size(mut self, small_block_size: usize) -> Self {
        self.small_block_size = Some(small_block_size);
        self
    }

    /// Resolves and validates the parameters for a problem of size `n`.
    pub fn build(self, n: usize) -> Result<EighParams, EighError> {
        if n == 0 {
            return Err(EighErrorKind::EmptyProblem.into());
        }

        let block_size = match self.block_size {
            Some(0) => return Err(EighErrorKind::ZeroBlockSize.into()),
            Some(block_size) => block_size,
            None => default_block_size(n),
        };
        if block_size > n {
            return Err(EighErrorKind::BlockSizeExceedsProblem {
                block_size,
                problem_size: n,
            }
            .into());
        }

        let small_block_size = match self.small_block_size {
            Some(0) => return Err(EighErrorKind::ZeroSmallBlockSize.into()),
            Some(small_block_size) => small_block_size,
            None => default_small_block_size(block_size),
        };
        if small_block_size > block_size {
            return Err(EighErrorKind::SmallBlockExceedsBlock {
                block_size,
                small_block_size,
            }
            .into());
        }
        if block_size % small_block_size != 0 {
            return Err(EighErrorKind::IndivisibleBlockSize {
                block_size,
                small_block_size,
            }
            .into());
        }

        Ok(EighParams {
            block_size,
            small_block_size,
        })
    }
}

fn default_block_size(n: usize) -> usize {
    if n >= BLOCK_SIZE_GRANULE {
        MAX_BLOCK_SIZE.min(n / BLOCK_SIZE_GRANULE * BLOCK_SIZE_GRANULE)
    } else {
        n
    }
}

fn default_small_block_size(block_size: usize) -> usize {
    let mut small = block_size.div_ceil(4).clamp(1, block_size.max(1));
    // Fall back to the nearest divisor so the defaults always validate.
    while block_size % small != 0 {
        small -= 1;
    }
    small
}

/// Eigenvalues and eigenvectors of a symmetric matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpairs {
    n: usize,
    eigenvalues: Vec<f32>,
    eigenvectors: Vec<f32>,
}

impl Eigenpairs {
    /// Side length of the decomposed matrix.
    pub fn problem_size(&self) -> usize {
        self.n
    }

    /// Eigenvalues in non-decreasing order.
    pub fn eigenvalues(&self) -> &[f32] {
        &self.eigenvalues
    }

    /// Eigenvectors as a flat column-major `n x n` buffer; column `i` belongs to
    /// `eigenvalues()[i]`.
    pub fn eigenvectors(&self) -> &[f32] {
        &self.eigenvectors
    }

    /// The eigenvector belonging to `eigenvalues()[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n`.
    pub fn eigenvector(&self, i: usize) -> &[f32] {
        &self.eigenvectors[i * self.n..(i + 1) * self.n]
    }

    /// The eigenvectors as a matrix view.
    pub fn eigenvectors_mat(&self) -> MatRef<'_, f32> {
        MatRef::from_column_major_slice(&self.eigenvectors, self.n, self.n)
    }

    /// Consumes the result, returning `(eigenvalues, eigenvectors)`.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.eigenvalues, self.eigenvectors)
    }
}

/// Computes all eigenvalues and eigenvectors of a dense symmetric matrix.
///
/// `matrix` is a flat column-major buffer of length `n * n`; only its lower triangle is
/// referenced (for a symmetric buffer row- and column-major storage coincide).
/// `block_size` and `small_block_size` override the blocking heuristic.
///
/// # Errors
///
/// Returns an invalid-descriptor error if the buffer length is not `n * n`, if `n == 0`,
/// if `block_size` exceeds `n`, or if `block_size` is not a multiple of `small_block_size`.
pub fn symmetric_eigen(
    matrix: &[f32],
    n: usize,
    block_size: Option<usize>,
    small_block_size: Option<usize>,
) -> Result<Eigenpairs, EighError> {
    let mut builder = EighParams::builder();
    if let Some(block_size) = block_size {
        builder = builder.block_size(block_size);
    }
    if let Some(small_block_size) = small_block_size {
        builder = builder.small_block_size(small_block_size);
    }
    // The buffer is checked before the blocking parameters.
    check_buffer(matrix, n)?;
    let params = builder.build(n)?;
    symmetric_eigen_with(matrix, n, &params, &FaerTridiagonalSolver)
}

/// Computes all eigenpairs with explicit parameters and tridiagonal solver.
///
/// # Errors
///
/// Returns an invalid-descriptor error if the buffer length is not `n * n` or if `params`
/// were validated for a smaller problem; propagates failures of `solver`.
pub fn symmetric_eigen_with<S>(
    matrix: &[f32],
    n: usize,
    params: &EighParams,
    solver: &S,
) -> Result<Eigenpairs, EighError>
where
    S: TridiagonalSolver + ?Sized,
{
    check_buffer(matrix, n)?;
    if params.block_size > n {
        return Err(EighErrorKind::BlockSizeExceedsProblem {
            block_size: params.block_size,
            problem_size: n,
        }
        .into());
    }

    if n == 1 {
        log::debug!("Trivial 1x1 problem, no reduction needed.");
        return Ok(Eigenpairs {
            n,
            eigenvalues: vec![matrix[0]],
            eigenvectors: vec![1.0],
        });
    }

    let mut a = Mat::from_fn(n, n, |i, j| {
        if i >= j {
            matrix[i + j * n]
        } else {
            matrix[j + i * n]
        }
    });
    log::debug!(
        "Block sizes chosen for n={n}: block_size={}, small_block_size={}.",
        params.block_size,
        params.small_block_size
    );

    let reduction = reduce_to_band(a.as_mut(), params.block_size, params.small_block_size);
    log::debug!(
        "Band reduced to bandwidth {} with {} panels.",
        reduction.bandwidth,
        reduction.blocks.len()
    );

    let chase = chase_bulges(a.as_mut(), reduction.bandwidth);
    if reduction.bandwidth > 1 {
        log::debug!(
            "Bulges chased with {} reflectors.",
            chase.reflectors().len()
        );
    }
    drop(a);

    let eigen = solver.solve(&chase.diagonal, &chase.off_diagonal)?;
    log::debug!("Tridiagonal eigenproblem solved.");

    let mut z = eigen.eigenvectors;
    transform_eigenvectors(z.as_mut(), &reduction, &chase);

    let eigenvectors = (0..n)
        .flat_map(|j| (0..n).map(move |i| (i, j)))
        .map(|(i, j)| z[(i, j)])
        .collect();

    Ok(Eigenpairs {
        n,
        eigenvalues: eigen.eigenvalues,
        eigenvectors,
    })
}

fn transform_eigenvectors(z: MatMut<'_, f32>, reduction: &BandReduction, chase: &BulgeChase) {
    let mut z = z;
    if reduction.bandwidth > 1 {
        back_transform::apply_bulge_reflectors(z.rb_mut(), chase);
        log::debug!("Bulge reflectors back-transformed.");
    }
    back_transform::apply_band_blocks(z, reduction);
    log::debug!(
        "Band blocks back-transformed ({} blocks).",
        reduction.blocks.len()
    );
}

fn check_buffer(matrix: &[f32], n: usize) -> Result<(), EighError> {
    if n == 0 {
        return Err(EighErrorKind::EmptyProblem.into());
    }
    let expected = n.checked_mul(n).unwrap_or(usize::MAX);
    if matrix.len() != expected {
        return Err(EighErrorKind::BufferLength {
            expected,
            actual: matrix.len(),
        }
        .into());
    }
    Ok(())
}
