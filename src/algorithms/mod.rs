//! The two-stage reduction core.
//!
//! ** NOTE: We recommend using the high-level method [`crate::solvers::symmetric_eigen`]
//! instead. These modules are intended for callers that want to drive or inspect individual
//! stages of the pipeline.
//!
//! A dense symmetric matrix `A` is diagonalized in four steps:
//!
//! 1. [`band_reduction`]: blocked Householder reduction `A = Q1 B Q1^T` to a band matrix `B`
//!    whose bandwidth equals the block size. Each panel produces one [`ReflectorBlock`].
//! 2. [`bulge_chasing`]: unblocked reduction `B = Q2 T Q2^T` to a tridiagonal `T`, recording
//!    every [`ChaseReflector`] in generation order.
//! 3. The tridiagonal eigenproblem `T = Z D Z^T` is handed to a
//!    [`crate::tridiagonal::TridiagonalSolver`].
//! 4. [`back_transform`]: the eigenvectors of `A` are `Q1 Q2 Z`, built by replaying the bulge
//!    reflectors and then the band blocks, both in reverse order.
//!
//! The building blocks are [`householder`] (single reflectors) and [`compact_wy`] (blocks of
//! reflectors applied as matrix products).
//!
//! ## Reflector encoding
//!
//! Every stored reflector vector carries its leading `1` explicitly. A reflector with
//! `tau == 0` is the identity; such sentinels are produced for zero or already-eliminated
//! columns and are never an error.

pub mod back_transform;
pub mod band_reduction;
pub mod bulge_chasing;
pub mod compact_wy;
pub mod householder;

use faer::{ColRef, Mat, MatRef};

/// Magnitude below which a reflector is considered degenerate: twice the smallest normal
/// `f32`.
#[inline]
pub fn degeneracy_threshold() -> f32 {
    2.0 * f32::MIN_POSITIVE
}

/// A block of reflectors produced by one panel of the band reduction.
///
/// The block represents `Q = H_0 H_1 ... H_{k-1} = I - V T V^T`, acting on the rows
/// `row_offset..n` of the working matrix.
#[derive(Debug, Clone)]
pub struct ReflectorBlock {
    /// First column of the panel that was eliminated.
    pub panel_start: usize,
    /// First row (and column) of the trailing matrix the block acts on.
    pub row_offset: usize,
    /// Unit lower-trapezoidal basis `V` (`m x k`), with explicit ones on its diagonal.
    pub basis: Mat<f32>,
    /// Upper-triangular compact WY factor `T` (`k x k`), cached for back-transformation.
    pub factor: Mat<f32>,
}

impl ReflectorBlock {
    /// Number of reflectors in the block.
    pub fn len(&self) -> usize {
        self.basis.ncols()
    }

    /// Returns `true` if the block holds no reflectors.
    pub fn is_empty(&self) -> bool {
        self.basis.ncols() == 0
    }

    /// Number of rows the block acts on.
    pub fn rows(&self) -> usize {
        self.basis.nrows()
    }
}

/// Output of the first reduction stage.
#[derive(Debug, Clone)]
pub struct BandReduction {
    /// Bandwidth of the reduced matrix.
    pub bandwidth: usize,
    /// Reflector blocks in panel order.
    pub blocks: Vec<ReflectorBlock>,
}

/// A single reflector recorded while chasing bulges.
///
/// The vector itself lives in the coefficient pool of the owning [`BulgeChase`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseReflector {
    /// Sweep (the column being reduced to tridiagonal form) that generated the reflector.
    pub sweep: usize,
    /// First row the reflector acts on.
    pub row: usize,
    /// Number of rows the reflector acts on.
    pub len: usize,
    /// Scaling factor of `H = I - tau v v^T`.
    pub tau: f32,
    offset: usize,
}

/// Output of the second reduction stage: the tridiagonal matrix and the reflectors that
/// produced it.
#[derive(Debug, Clone, Default)]
pub struct BulgeChase {
    /// Diagonal of the tridiagonal matrix (length `n`).
    pub diagonal: Vec<f32>,
    /// Sub-diagonal of the tridiagonal matrix (length `n - 1`).
    pub off_diagonal: Vec<f32>,
    reflectors: Vec<ChaseReflector>,
    coefficients: Vec<f32>,
}

impl BulgeChase {
    /// Copies the diagonal and first sub-diagonal of `a`.
    pub(crate) fn extract_tridiagonal(&mut self, a: MatRef<'_, f32>) {
        let n = a.nrows();
        self.diagonal = (0..n).map(|i| a[(i, i)]).collect();
        self.off_diagonal = (0..n.saturating_sub(1)).map(|i| a[(i + 1, i)]).collect();
    }

    pub(crate) fn push(&mut self, sweep: usize, row: usize, tau: f32, vector: ColRef<'_, f32>) {
        let offset = self.coefficients.len();
        let len = vector.nrows();
        self.coefficients.extend((0..len).map(|i| vector[i]));
        self.reflectors.push(ChaseReflector {
            sweep,
            row,
            len,
            tau,
            offset,
        });
    }

    /// Reflectors in generation order.
    pub fn reflectors(&self) -> &[ChaseReflector] {
        &self.reflectors
    }

    /// The Householder vector of `reflector` (leading entry is 1).
    pub fn vector(&self, reflector: &ChaseReflector) -> ColRef<'_, f32> {
        ColRef::from_slice(&self.coefficients[reflector.offset..reflector.offset + reflector.len])
    }
}
