//! Parallel-algorithm benchmarking harness.
//!
//! Six compute kernels (array sum, dense matrix multiply, chunked sort,
//! linear search, Monte Carlo pi, naive DFT) share one execution pattern:
//! partition a linear index domain into contiguous chunks, submit one task
//! per chunk to a fixed-size worker pool, join, and aggregate the partial
//! results. The harness runs each kernel under a sweep of worker counts and
//! reports wall-clock time per (kernel, worker count) pair.

pub mod config;
pub mod error;
pub mod kernels;
pub mod output;
pub mod partition;
pub mod pool;
pub mod runner;
pub mod timer;
pub mod workload;
