//! This module defines the custom error types for the library.
//!
//! Every failure the eigensolver can report is collected in a single enum,
//! [`EighErrorKind`], wrapped by the public [`EighError`]. Almost all variants describe a
//! malformed problem descriptor and are raised before any computation starts. Numerical
//! degeneracy inside the reduction (zero or already-eliminated columns) is never an error.
//!
//! Using the [`thiserror`] crate allows us to create idiomatic error types with minimal
//! boilerplate. Note that [`faer::linalg::evd::EvdError`] does not implement the standard
//! [`std::error::Error`] trait, so we wrap it manually to provide a compatible error type.
use thiserror::Error;

/// Represents all possible errors that can occur during a symmetric eigendecomposition.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct EighError(#[from] EighErrorKind);

impl EighError {
    /// Returns the specific kind of failure.
    pub fn kind(&self) -> &EighErrorKind {
        &self.0
    }

    /// Returns `true` if the error was caused by a malformed problem descriptor
    /// (buffer size, problem size or block-size parameters).
    pub fn is_invalid_descriptor(&self) -> bool {
        !matches!(self.0, EighErrorKind::TridiagonalSolver(_))
    }
}

/// The distinct kinds of errors.
#[derive(Error, Debug, PartialEq)]
pub enum EighErrorKind {
    /// The flat matrix buffer does not hold exactly `n * n` entries.
    #[error("Invalid descriptor: matrix buffer holds {actual} entries, expected {expected} (n * n).")]
    BufferLength { expected: usize, actual: usize },

    /// The problem size is zero.
    #[error("Invalid descriptor: problem size must be positive.")]
    EmptyProblem,

    /// A block size of zero was requested.
    #[error("Invalid descriptor: block size must be positive.")]
    ZeroBlockSize,

    /// A small block size of zero was requested.
    #[error("Invalid descriptor: small block size must be positive.")]
    ZeroSmallBlockSize,

    /// The block size is larger than the matrix.
    #[error(
        "Invalid descriptor: block size {block_size} exceeds the problem size {problem_size}."
    )]
    BlockSizeExceedsProblem {
        block_size: usize,
        problem_size: usize,
    },

    /// The small block size is larger than the block size.
    #[error(
        "Invalid descriptor: small block size {small_block_size} exceeds the block size {block_size}."
    )]
    SmallBlockExceedsBlock {
        block_size: usize,
        small_block_size: usize,
    },

    /// The block size is not a multiple of the small block size.
    #[error(
        "Invalid descriptor: block size {block_size} is not divisible by small block size {small_block_size}."
    )]
    IndivisibleBlockSize {
        block_size: usize,
        small_block_size: usize,
    },

    /// Wraps an error originating from the tridiagonal eigensolver.
    #[error("The tridiagonal eigensolver failed: {0:?}")]
    TridiagonalSolver(faer::linalg::evd::EvdError),
}

// Manually implement PartialEq for the public error type.
// We compare the inner `EighErrorKind`.
impl PartialEq for EighError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
