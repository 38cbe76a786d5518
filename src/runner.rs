//! The experiment sweep.
//!
//! Treatments are worker counts, blocks are kernels: for each configured
//! worker count, every selected kernel is generated fresh from the seed, run
//! once under the timer, and reported as one `"<label>: <elapsed> ms"` line.
//! Workload generation happens outside the timed region, so the line reports
//! the parallel computation alone.

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;

use crate::config::{BenchConfig, Kernel};
use crate::error::BenchError;
use crate::kernels;
use crate::timer;
use crate::workload;

pub fn run(config: &BenchConfig) -> Result<(), BenchError> {
    println!("{}", "=== Parallel kernel benchmark ===".bold());

    for &threads in &config.thread_counts {
        println!();
        println!(
            "{}",
            format!("--- Treatment: {threads} worker(s) ---").cyan()
        );
        for &kernel in &config.kernels {
            let elapsed = run_kernel(config, kernel, threads)?;
            println!("{}: {} ms", kernel.label(), elapsed.as_millis());
        }
    }
    Ok(())
}

fn run_kernel(config: &BenchConfig, kernel: Kernel, threads: usize) -> Result<Duration, BenchError> {
    let opts = config.run_options(threads);
    let mut rng = workload::rng_for(config.seed);

    match kernel {
        Kernel::Sum => {
            let data = Arc::new(workload::small_value_array(&mut rng, config.array_size));
            let (result, elapsed) = timer::measure(|| kernels::sum::run(data, &opts));
            report_expiry(kernels::sum::LABEL, result?.timed_out);
            Ok(elapsed)
        }
        Kernel::MatMul => {
            let a = Arc::new(kernels::matmul::Matrix::random(&mut rng, config.matrix_size));
            let b = Arc::new(kernels::matmul::Matrix::random(&mut rng, config.matrix_size));
            let (result, elapsed) = timer::measure(|| kernels::matmul::run(a, b, &opts));
            report_expiry(kernels::matmul::LABEL, result?.timed_out);
            Ok(elapsed)
        }
        Kernel::Sort => {
            let data = workload::scrambled_array(&mut rng, config.sort_size);
            let (result, elapsed) = timer::measure(|| kernels::sort::run(data, &opts));
            report_expiry(kernels::sort::LABEL, result?.timed_out);
            Ok(elapsed)
        }
        Kernel::Search => {
            let data = Arc::new(workload::scrambled_array(&mut rng, config.search_size));
            let target = workload::present_target(&mut rng, &data);
            let (result, elapsed) = timer::measure(|| kernels::search::run(data, target, &opts));
            report_expiry(kernels::search::LABEL, result?.timed_out);
            Ok(elapsed)
        }
        Kernel::MonteCarlo => {
            let points = config.monte_carlo_points;
            let seed = config.seed;
            let (result, elapsed) =
                timer::measure(|| kernels::monte_carlo::run(points, seed, &opts));
            report_expiry(kernels::monte_carlo::LABEL, result?.timed_out);
            Ok(elapsed)
        }
        Kernel::Dft => {
            let re = Arc::new(workload::signal(&mut rng, config.dft_size));
            let im = Arc::new(vec![0.0; config.dft_size]);
            let (result, elapsed) = timer::measure(|| kernels::dft::run(re, im, &opts));
            report_expiry(kernels::dft::LABEL, result?.timed_out);
            Ok(elapsed)
        }
    }
}

/// Best-effort runs can hit the join deadline and keep going; say so instead
/// of letting a partial run pass for a finished one.
fn report_expiry(label: &str, timed_out: bool) {
    if timed_out {
        eprintln!(
            "{}",
            format!("{label}: join deadline expired, run is partial").yellow()
        );
    }
}
