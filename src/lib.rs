//! Two-stage blocked eigensolver for dense symmetric `f32` matrices.
//!
//! This crate computes all eigenvalues and eigenvectors of a real symmetric matrix `A` by
//! reducing it in two stages before handing a tridiagonal problem to a dedicated kernel:
//!
//! 1. **Band reduction**: blocked Householder transformations, applied in compact WY form,
//!    reduce `A` to a band matrix `B = Q1^T A Q1` whose bandwidth equals the block size.
//!    Almost all of the work in this stage is matrix-matrix products.
//! 2. **Bulge chasing**: unblocked Householder reflectors reduce `B` to a tridiagonal
//!    `T = Q2^T B Q2`, chasing the fill-in introduced by each reflector down the band.
//!
//! The tridiagonal eigenproblem `T = Z D Z^T` is solved by a [`tridiagonal::TridiagonalSolver`]
//! (by default on top of [`faer`]'s self-adjoint eigendecomposition), and the eigenvectors of
//! `A` are recovered as `Q1 Q2 Z` by replaying the recorded reflectors.
//!
//! Going through a band matrix instead of reducing to tridiagonal form directly moves most of
//! the floating-point work into level-3 kernels.
//!
//! ## Example Usage
//!
//! Matrices are passed as flat column-major buffers of length `n * n`. Only the lower
//! triangle is read.
//!
//! ```rust
//! use two_stage_eigh::symmetric_eigen;
//!
//! // The 1D Laplacian [[2, -1, 0], [-1, 2, -1], [0, -1, 2]].
//! let a = [2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0];
//!
//! // Let the heuristic pick the block sizes.
//! let result = symmetric_eigen(&a, 3, None, None).unwrap();
//!
//! // Eigenvalues are 2 - sqrt(2), 2 and 2 + sqrt(2), in ascending order.
//! let expected = [2.0 - 2f32.sqrt(), 2.0, 2.0 + 2f32.sqrt()];
//! for (computed, exact) in result.eigenvalues().iter().zip(expected) {
//!     assert!((computed - exact).abs() < 1e-5);
//! }
//!
//! // Column i of the eigenvector buffer belongs to eigenvalue i.
//! let v = result.eigenvector(1);
//! assert!(v[1].abs() < 1e-5);
//! ```
//!
//! Block sizes can be forced, as long as the block size does not exceed `n` and is a
//! multiple of the small block size:
//!
//! ```rust
//! use two_stage_eigh::{EighParams, symmetric_eigen_with, tridiagonal::FaerTridiagonalSolver};
//!
//! let n: usize = 12;
//! let a: Vec<f32> = (0..n * n)
//!     .map(|k| {
//!         let (i, j) = (k % n, k / n);
//!         1.0 / (1.0 + i.abs_diff(j) as f32)
//!     })
//!     .collect();
//!
//! let params = EighParams::builder().block_size(4).small_block_size(2).build(n).unwrap();
//! let result = symmetric_eigen_with(&a, n, &params, &FaerTridiagonalSolver).unwrap();
//! assert!(result.eigenvalues().windows(2).all(|w| w[0] <= w[1]));
//! ```
//!
//! ## Errors
//!
//! Inconsistent descriptors (wrong buffer length, block size larger than `n`, block size not
//! divisible by the small block size, ...) are reported as [`error::EighError`] before any
//! work is done. Numerical degeneracies such as zero columns are never errors.

pub mod algorithms;
pub mod blas;
pub mod error;
pub mod solvers;
pub mod tridiagonal;
pub mod utils;

// Re-export the main API from solvers for convenient access.
pub use solvers::{EighParams, EighParamsBuilder, Eigenpairs, symmetric_eigen, symmetric_eigen_with};
