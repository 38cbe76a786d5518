//! Array sum reduction: per-chunk partial sums added at the join.
//!
//! The accumulator is 64-bit on purpose. Benchmark inputs go up to 150
//! million elements of values up to 9, so the total overflows `i32` long
//! before the array does anything interesting. Addition is associative, so
//! the result is identical for every worker count and schedule.

use std::sync::Arc;

use crate::config::RunOptions;
use crate::error::BenchError;
use crate::kernels::{apply_policy, KernelOutcome};
use crate::partition::partition;
use crate::pool::WorkerPool;

pub const LABEL: &str = "Array sum";

pub fn run(data: Arc<Vec<i32>>, opts: &RunOptions) -> Result<KernelOutcome<i64>, BenchError> {
    let pool = WorkerPool::new(opts.threads);

    let handles: Vec<_> = partition(data.len(), opts.threads)
        .into_iter()
        .map(|chunk| {
            let data = Arc::clone(&data);
            pool.submit(move || data[chunk.range()].iter().map(|&v| v as i64).sum::<i64>())
        })
        .collect();

    let outcome = pool.join_deadline(handles, opts.join_timeout);
    let partials = apply_policy(LABEL, outcome, opts)?;
    let total = partials.values.into_iter().sum();

    if !partials.timed_out {
        pool.shutdown();
    }
    Ok(KernelOutcome {
        value: total,
        timed_out: partials.timed_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use std::time::Duration;

    fn sequential(data: &[i32]) -> i64 {
        data.iter().map(|&v| v as i64).sum()
    }

    #[test]
    fn matches_sequential_when_chunks_divide_unevenly() {
        let data: Arc<Vec<i32>> = Arc::new((1..=17).collect());
        let expected = sequential(&data);
        let outcome = run(Arc::clone(&data), &RunOptions::strict(5)).unwrap();
        assert_eq!(outcome.value, expected);
        assert!(!outcome.timed_out);
    }

    #[test]
    fn result_is_independent_of_worker_count() {
        let data: Arc<Vec<i32>> = Arc::new((0..10_000).map(|i| i % 9 + 1).collect());
        let expected = sequential(&data);
        for threads in 1..=6 {
            let outcome = run(Arc::clone(&data), &RunOptions::strict(threads)).unwrap();
            assert_eq!(outcome.value, expected, "threads = {threads}");
        }
    }

    #[test]
    fn wide_accumulator_survives_values_past_i32() {
        let data = Arc::new(vec![i32::MAX; 4]);
        let outcome = run(data, &RunOptions::strict(2)).unwrap();
        assert_eq!(outcome.value, 4 * i64::from(i32::MAX));
    }

    #[test]
    fn empty_array_sums_to_zero() {
        let data = Arc::new(Vec::new());
        assert_eq!(run(data, &RunOptions::strict(4)).unwrap().value, 0);
    }

    #[test]
    fn best_effort_expiry_is_flagged_not_silent() {
        // A zero deadline expires before the chunk sums can land; the
        // partial total must come back visibly flagged, never posing as a
        // finished sum.
        let data = Arc::new(vec![1; 8_000_000]);
        let opts = RunOptions {
            threads: 2,
            failure_policy: FailurePolicy::BestEffort,
            join_timeout: Duration::ZERO,
        };
        let outcome = run(data, &opts).unwrap();
        assert!(outcome.timed_out);
    }
}
