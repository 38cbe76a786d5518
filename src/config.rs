//! Experiment configuration.
//!
//! One configuration drives the whole sweep: which worker counts to treat,
//! which kernels to run, how large each workload is, and how the join point
//! reacts to failures. Defaults mirror the original experiment constants.

use std::time::Duration;

/// How the join point treats task failures and deadline expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Surface the first task failure or deadline expiry as an error.
    #[default]
    Strict,
    /// Keep whatever partials arrived and skip the rest. This reproduces the
    /// old unattended-benchmark behavior, but as an explicit opt-in rather
    /// than a silent default.
    BestEffort,
}

/// The six benchmark kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    Sum,
    MatMul,
    Sort,
    Search,
    MonteCarlo,
    Dft,
}

impl Kernel {
    pub const ALL: [Kernel; 6] = [
        Kernel::Sum,
        Kernel::MatMul,
        Kernel::Sort,
        Kernel::Search,
        Kernel::MonteCarlo,
        Kernel::Dft,
    ];

    /// The label printed in front of each result line.
    pub fn label(self) -> &'static str {
        match self {
            Kernel::Sum => crate::kernels::sum::LABEL,
            Kernel::MatMul => crate::kernels::matmul::LABEL,
            Kernel::Sort => crate::kernels::sort::LABEL,
            Kernel::Search => crate::kernels::search::LABEL,
            Kernel::MonteCarlo => crate::kernels::monte_carlo::LABEL,
            Kernel::Dft => crate::kernels::dft::LABEL,
        }
    }

    pub fn from_name(name: &str) -> Option<Kernel> {
        match name {
            "sum" => Some(Kernel::Sum),
            "matmul" => Some(Kernel::MatMul),
            "sort" => Some(Kernel::Sort),
            "search" => Some(Kernel::Search),
            "pi" => Some(Kernel::MonteCarlo),
            "dft" => Some(Kernel::Dft),
            _ => None,
        }
    }
}

/// Per-invocation knobs handed to each kernel.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub threads: usize,
    pub failure_policy: FailurePolicy,
    pub join_timeout: Duration,
}

impl RunOptions {
    /// Strict policy with the default one-minute join deadline.
    pub fn strict(threads: usize) -> Self {
        RunOptions {
            threads,
            failure_policy: FailurePolicy::Strict,
            join_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// The treatment set: worker counts to sweep.
    pub thread_counts: Vec<usize>,
    pub kernels: Vec<Kernel>,
    pub array_size: usize,
    pub matrix_size: usize,
    pub sort_size: usize,
    pub search_size: usize,
    pub monte_carlo_points: usize,
    pub dft_size: usize,
    /// Seed for workload generation and the Monte Carlo task RNGs.
    pub seed: u64,
    pub failure_policy: FailurePolicy,
    pub join_timeout: Duration,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            thread_counts: vec![1, 2, 4],
            kernels: Kernel::ALL.to_vec(),
            array_size: 5_000_000,
            matrix_size: 200,
            sort_size: 500_000,
            search_size: 1_000_000,
            monte_carlo_points: 10_000_000,
            dft_size: 2_048,
            seed: 0xDBCA,
            failure_policy: FailurePolicy::default(),
            join_timeout: Duration::from_secs(60),
        }
    }
}

impl BenchConfig {
    /// Replaces the fixed treatment set with a sweep over every core.
    pub fn sweep_all_cores(mut self) -> Self {
        self.thread_counts = (1..=num_cpus::get()).collect();
        self
    }

    pub fn run_options(&self, threads: usize) -> RunOptions {
        RunOptions {
            threads,
            failure_policy: self.failure_policy,
            join_timeout: self.join_timeout,
        }
    }
}
