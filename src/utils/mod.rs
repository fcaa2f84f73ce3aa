//! Common utilities for generating test problems and measuring accuracy.
//!
//! This module provides helper functions used across the experimental binaries and the
//! integration tests. It is organized into two submodules:
//!
//! - **`problems`**: Builds symmetric test matrices as flat column-major buffers, either fully
//!   random or with a prescribed spectrum (obtained by rotating a diagonal matrix with a random
//!   orthogonal matrix), so the exact eigenvalues are known.
//!
//! - **`metrics`**: Computes the accuracy measures of a decomposition: reconstruction error
//!   `||A - V diag(w) V^T||_F`, loss of orthogonality `||V^T V - I||_F`, eigenvalue deviation,
//!   and the tolerance these are compared against.

pub mod metrics;
pub mod problems;
