//! Experiment Runner for the Accuracy Analysis.
//!
//! This executable measures the backward error and the loss of orthogonality of the
//! two-stage eigensolver over a sweep of problem sizes. For problems with a prescribed
//! spectrum, the computed eigenvalues are also compared against the exact ones. Each
//! problem size produces one CSV row.

use anyhow::{Result, ensure};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use two_stage_eigh::{
    EighParams, symmetric_eigen_with,
    tridiagonal::FaerTridiagonalSolver,
    utils::{metrics, problems},
};

/// The family of test matrices.
#[derive(ValueEnum, Clone, Debug, Copy)]
enum ProblemKind {
    /// Dense random symmetric matrix with entries in [-1, 1]; no reference spectrum.
    Random,
    /// Eigenvalues evenly spaced in [-1, 1], rotated by a random orthogonal matrix.
    Linear,
    /// Three clusters of exactly repeated eigenvalues.
    Clustered,
    /// Eigenvalues spanning six orders of magnitude.
    Graded,
}

/// Command-line arguments for the accuracy experiment.
#[derive(Parser, Debug)]
#[clap(
    name = "accuracy-runner",
    about = "Runs an accuracy analysis of the two-stage symmetric eigensolver."
)]
struct AccuracyArgs {
    /// The family of test matrices.
    #[clap(long, value_enum, default_value_t = ProblemKind::Random)]
    problem: ProblemKind,

    /// Smallest problem size to test.
    #[clap(long, default_value_t = 16)]
    n_min: usize,

    /// Largest problem size to test.
    #[clap(long, default_value_t = 256)]
    n_max: usize,

    /// Step size for iterating n.
    #[clap(long, default_value_t = 16)]
    n_step: usize,

    /// Block size override; the heuristic is used when omitted.
    #[clap(long)]
    block_size: Option<usize>,

    /// Small block size override; the heuristic is used when omitted.
    #[clap(long)]
    small_block_size: Option<usize>,

    /// Seed for the random problem generators.
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// Represents a single row of data for the accuracy analysis CSV.
#[derive(Debug, Serialize)]
struct AccuracyResult {
    /// Problem size.
    n: usize,
    /// Block sizes used for the decomposition.
    block_size: usize,
    small_block_size: usize,
    /// `||A - V diag(w) V^T||_F / ||A||_F`.
    relative_reconstruction_error: f32,
    /// `||V^T V - I||_F`.
    orthogonality_error: f32,
    /// Largest deviation from the exact eigenvalues, when they are known.
    max_eigenvalue_deviation: Option<f32>,
    /// Whether both errors are within `C * n * eps * ||A||`.
    within_tolerance: bool,
}

/// Builds the test matrix and, when known, its exact eigenvalues.
fn create_problem(kind: ProblemKind, n: usize, seed: u64) -> (Vec<f32>, Option<Vec<f32>>) {
    match kind {
        ProblemKind::Random => (problems::random_symmetric(n, seed), None),
        ProblemKind::Linear => {
            let eigenvalues = problems::linear_spectrum(n, -1.0, 1.0);
            (problems::with_spectrum(&eigenvalues, seed), Some(eigenvalues))
        }
        ProblemKind::Clustered => {
            let (a, eigenvalues) = problems::clustered(n, seed);
            (a, Some(eigenvalues))
        }
        ProblemKind::Graded => {
            let eigenvalues: Vec<f32> = problems::linear_spectrum(n, -6.0, 0.0)
                .into_iter()
                .map(|e| 10f32.powf(e))
                .collect();
            (problems::with_spectrum(&eigenvalues, seed), Some(eigenvalues))
        }
    }
}

/// The main entry point for the accuracy experiment.
fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = AccuracyArgs::parse();
    ensure!(args.n_min > 0, "n_min must be positive");
    ensure!(args.n_step > 0, "n_step must be positive");
    log::info!(
        "Starting accuracy analysis for problem kind {:?}, n in {}..={} step {}",
        args.problem,
        args.n_min,
        args.n_max,
        args.n_step
    );

    let mut results = Vec::new();
    for n in (args.n_min..=args.n_max).step_by(args.n_step) {
        log::info!("Running for n = {}...", n);
        let (a, exact) = create_problem(args.problem, n, args.seed);

        let mut builder = EighParams::builder();
        if let Some(block_size) = args.block_size {
            builder = builder.block_size(block_size.min(n));
        }
        if let Some(small_block_size) = args.small_block_size {
            builder = builder.small_block_size(small_block_size);
        }
        let params = match builder.build(n) {
            Ok(params) => params,
            Err(e) => {
                log::warn!("Skipping n={}: {}", n, e);
                continue;
            }
        };

        let eig = match symmetric_eigen_with(&a, n, &params, &FaerTridiagonalSolver) {
            Ok(eig) => eig,
            Err(e) => {
                log::error!("Decomposition failed at n={}: {}. Stopping.", n, e);
                break;
            }
        };

        let norm = metrics::frobenius_norm(&a);
        let reconstruction = metrics::reconstruction_error(&a, n, &eig);
        let orthogonality = metrics::orthogonality_error(&eig);
        let within_tolerance = reconstruction <= metrics::residual_tolerance(n, norm)
            && orthogonality <= metrics::residual_tolerance(n, 1.0);
        if !within_tolerance {
            log::warn!(
                "n={}: errors exceed tolerance (reconstruction {:e}, orthogonality {:e}).",
                n,
                reconstruction,
                orthogonality
            );
        }

        results.push(AccuracyResult {
            n,
            block_size: params.block_size(),
            small_block_size: params.small_block_size(),
            relative_reconstruction_error: reconstruction / norm.max(f32::MIN_POSITIVE),
            orthogonality_error: orthogonality,
            max_eigenvalue_deviation: exact
                .as_deref()
                .map(|exact| metrics::max_eigenvalue_deviation(eig.eigenvalues(), exact)),
            within_tolerance,
        });
    }

    log::info!("Writing results to {:?}...", &args.output);
    let mut writer = csv::Writer::from_path(&args.output)?;
    for record in results {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("Accuracy analysis complete.");
    Ok(())
}
