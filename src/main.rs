//! Benchmark entry point.
//!
//! One binary runs any subset of the kernels, replacing the pair of
//! copy-pasted harness variants this experiment started life as. Kernel
//! names select the blocks to run; flags tune the sweep and failure policy.
//!
//! ```text
//! parallel-bench                 # all kernels, worker counts 1, 2, 4
//! parallel-bench sum search      # just those two kernels
//! parallel-bench --sweep-cores   # worker counts 1..=num_cpus
//! parallel-bench --best-effort   # keep going past task failures/timeouts
//! ```

use std::process;

use parallel_bench::config::{BenchConfig, FailurePolicy, Kernel};
use parallel_bench::runner;

fn main() {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    if let Err(err) = runner::run(&config) {
        eprintln!("benchmark failed: {err}");
        process::exit(1);
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<BenchConfig, String> {
    let mut config = BenchConfig::default();
    let mut kernels = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--best-effort" => config.failure_policy = FailurePolicy::BestEffort,
            "--sweep-cores" => config = config.sweep_all_cores(),
            "all" => kernels.extend(Kernel::ALL),
            name => match Kernel::from_name(name) {
                Some(kernel) => kernels.push(kernel),
                None => {
                    return Err(format!(
                        "unknown kernel '{name}' (expected sum, matmul, sort, search, pi, dft, or all)"
                    ))
                }
            },
        }
    }

    if !kernels.is_empty() {
        config.kernels = kernels;
    }
    Ok(config)
}
