//! Experiment Runner for the Block-Size Analysis.
//!
//! This executable decomposes one random symmetric matrix with every valid combination of
//! block size and small block size from the given candidate lists, recording the wall-clock
//! time of each run and the deviation of its eigenvalues from a reference run with the
//! largest possible block size (`block_size = n`, a single full band). The blocking strategy
//! must not change the mathematical result, so the deviations should stay at rounding level.

use anyhow::{Result, ensure};
use clap::Parser;
use serde::Serialize;
use std::{path::PathBuf, time::Instant};
use two_stage_eigh::{
    EighParams, symmetric_eigen_with,
    tridiagonal::FaerTridiagonalSolver,
    utils::{metrics, problems},
};

/// Command-line arguments for the block-size experiment.
#[derive(Parser, Debug)]
#[clap(
    name = "blocking-runner",
    about = "Measures time and eigenvalue agreement of the eigensolver across block sizes."
)]
struct BlockingArgs {
    /// Dimension of the test matrix.
    #[clap(long, default_value_t = 512)]
    n: usize,

    /// Candidate block sizes.
    #[clap(long, value_delimiter = ',', default_values_t = vec![1, 4, 8, 16, 32, 64])]
    block_sizes: Vec<usize>,

    /// Candidate small block sizes.
    #[clap(long, value_delimiter = ',', default_values_t = vec![1, 2, 4, 8])]
    small_block_sizes: Vec<usize>,

    /// Number of timed repetitions per configuration; the fastest one is reported.
    #[clap(long, default_value_t = 3)]
    repetitions: usize,

    /// Seed for the random matrix.
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// Represents a single row of data for the block-size analysis CSV.
#[derive(Debug, Serialize)]
struct BlockingResult {
    n: usize,
    block_size: usize,
    small_block_size: usize,
    /// Fastest wall-clock time over all repetitions, in seconds.
    time_s: f64,
    /// Largest eigenvalue deviation from the single-band reference run.
    max_eigenvalue_deviation: f32,
    /// `||A - V diag(w) V^T||_F / ||A||_F`.
    relative_reconstruction_error: f32,
}

/// The main entry point for the block-size experiment.
fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = BlockingArgs::parse();
    ensure!(args.n > 0, "n must be positive");
    ensure!(args.repetitions > 0, "repetitions must be positive");

    let n = args.n;
    let a = problems::random_symmetric(n, args.seed);
    let norm = metrics::frobenius_norm(&a);

    log::info!("Computing reference decomposition with block_size = n = {n}...");
    let reference_params = EighParams::builder()
        .block_size(n)
        .small_block_size(1)
        .build(n)?;
    let reference = symmetric_eigen_with(&a, n, &reference_params, &FaerTridiagonalSolver)?;

    let mut results = Vec::new();
    for &block_size in &args.block_sizes {
        for &small_block_size in &args.small_block_sizes {
            let params = match EighParams::builder()
                .block_size(block_size)
                .small_block_size(small_block_size)
                .build(n)
            {
                Ok(params) => params,
                Err(e) => {
                    log::warn!("Skipping configuration: {}", e);
                    continue;
                }
            };
            log::info!(
                "Running block_size = {}, small_block_size = {}...",
                block_size,
                small_block_size
            );

            let mut best_time = f64::INFINITY;
            let mut last = None;
            for _ in 0..args.repetitions {
                let start_time = Instant::now();
                let eig = symmetric_eigen_with(&a, n, &params, &FaerTridiagonalSolver)?;
                best_time = best_time.min(start_time.elapsed().as_secs_f64());
                last = Some(eig);
            }
            let Some(eig) = last else {
                continue;
            };

            results.push(BlockingResult {
                n,
                block_size: params.block_size(),
                small_block_size: params.small_block_size(),
                time_s: best_time,
                max_eigenvalue_deviation: metrics::max_eigenvalue_deviation(
                    eig.eigenvalues(),
                    reference.eigenvalues(),
                ),
                relative_reconstruction_error: metrics::reconstruction_error(&a, n, &eig)
                    / norm.max(f32::MIN_POSITIVE),
            });
        }
    }

    log::info!("Writing results to {:?}...", &args.output);
    let mut writer = csv::Writer::from_path(&args.output)?;
    for record in results {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("Block-size analysis complete.");
    Ok(())
}
