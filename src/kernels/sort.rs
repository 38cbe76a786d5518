//! Chunked sort: a sort-cost benchmark, not a parallel sort.
//!
//! With more than one worker the kernel copies each chunk into its own
//! buffer, sorts the buffers independently, and returns them unmerged. That
//! is the contract, not an oversight: the benchmark measures raw sorting
//! cost under concurrency, and the `Vec<Vec<i32>>` return type keeps the
//! disjoint-sequences shape visible instead of posing as a full sort. A
//! k-way merge would turn this into a real parallel sort, but that is a
//! deliberate extension point, not missing work.

use std::sync::Arc;

use crate::config::RunOptions;
use crate::error::BenchError;
use crate::kernels::{apply_policy, KernelOutcome};
use crate::partition::partition;
use crate::pool::WorkerPool;

pub const LABEL: &str = "Chunked sort";

pub fn run(mut data: Vec<i32>, opts: &RunOptions) -> Result<KernelOutcome<Vec<Vec<i32>>>, BenchError> {
    if opts.threads == 1 {
        // Trivial treatment: plain in-place sort, no pool involved.
        data.sort_unstable();
        return Ok(KernelOutcome {
            value: vec![data],
            timed_out: false,
        });
    }

    let data = Arc::new(data);
    let pool = WorkerPool::new(opts.threads);

    let handles: Vec<_> = partition(data.len(), opts.threads)
        .into_iter()
        .map(|chunk| {
            let data = Arc::clone(&data);
            pool.submit(move || {
                let mut part = data[chunk.range()].to_vec();
                part.sort_unstable();
                part
            })
        })
        .collect();

    let outcome = pool.join_deadline(handles, opts.join_timeout);
    let partials = apply_policy(LABEL, outcome, opts)?;
    if !partials.timed_out {
        pool.shutdown();
    }
    Ok(KernelOutcome {
        value: partials.values,
        timed_out: partials.timed_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use crate::workload::{rng_for, scrambled_array};
    use std::time::Duration;

    #[test]
    fn single_worker_returns_one_fully_sorted_sequence() {
        let data = scrambled_array(&mut rng_for(31), 1000);
        let mut expected = data.clone();
        expected.sort_unstable();

        let parts = run(data, &RunOptions::strict(1)).unwrap().value;
        assert_eq!(parts, vec![expected]);
    }

    #[test]
    fn multi_worker_returns_sorted_parts_preserving_the_multiset() {
        let data = scrambled_array(&mut rng_for(32), 1003);
        let mut expected = data.clone();
        expected.sort_unstable();

        for threads in [2, 3, 4, 7] {
            let parts = run(data.clone(), &RunOptions::strict(threads)).unwrap().value;
            assert_eq!(parts.len(), threads);
            for part in &parts {
                assert!(part.windows(2).all(|w| w[0] <= w[1]));
            }

            // No merge happens, but nothing may be lost or invented either.
            let mut union: Vec<i32> = parts.into_iter().flatten().collect();
            union.sort_unstable();
            assert_eq!(union, expected, "threads = {threads}");
        }
    }

    #[test]
    fn duplicates_survive_the_split() {
        let data = vec![5, 5, 5, 1, 1, 9];
        let parts = run(data, &RunOptions::strict(3)).unwrap().value;
        let mut union: Vec<i32> = parts.into_iter().flatten().collect();
        union.sort_unstable();
        assert_eq!(union, vec![1, 1, 5, 5, 5, 9]);
    }

    #[test]
    fn best_effort_expiry_is_flagged_not_silent() {
        let data = scrambled_array(&mut rng_for(33), 4_000_000);
        let opts = RunOptions {
            threads: 2,
            failure_policy: FailurePolicy::BestEffort,
            join_timeout: Duration::ZERO,
        };
        let outcome = run(data, &opts).unwrap();
        assert!(outcome.timed_out);
    }
}
