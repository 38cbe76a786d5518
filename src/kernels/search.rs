//! Parallel linear search with genuine early cancellation.
//!
//! Each task scans its chunk for the target and the partials are OR-ed
//! together. The first task to find the target trips a shared cancel token;
//! the other tasks poll it between blocks and bail out instead of scanning
//! their chunks to completion, which is what the old harness let them do.

use std::sync::Arc;

use crate::config::RunOptions;
use crate::error::BenchError;
use crate::kernels::{apply_policy, KernelOutcome};
use crate::partition::partition;
use crate::pool::{CancelToken, WorkerPool};

pub const LABEL: &str = "Linear search";

/// Elements scanned between cancellation checks. Small enough to stop
/// promptly, large enough to keep the atomic load off the hot path.
const CANCEL_POLL_STRIDE: usize = 1024;

pub fn run(
    data: Arc<Vec<i32>>,
    target: i32,
    opts: &RunOptions,
) -> Result<KernelOutcome<bool>, BenchError> {
    let pool = WorkerPool::new(opts.threads);
    let cancel = CancelToken::new();

    let handles: Vec<_> = partition(data.len(), opts.threads)
        .into_iter()
        .map(|chunk| {
            let data = Arc::clone(&data);
            let cancel = cancel.clone();
            pool.submit(move || scan(&data[chunk.range()], target, &cancel))
        })
        .collect();

    let outcome = pool.join_deadline(handles, opts.join_timeout);
    let partials = apply_policy(LABEL, outcome, opts)?;
    let found = partials.values.into_iter().any(|hit| hit);

    if !partials.timed_out {
        pool.shutdown();
    }
    Ok(KernelOutcome {
        value: found,
        timed_out: partials.timed_out,
    })
}

fn scan(slice: &[i32], target: i32, cancel: &CancelToken) -> bool {
    for block in slice.chunks(CANCEL_POLL_STRIDE) {
        // Someone else already found it; a false here is still correct
        // because the finder's partial carries the answer.
        if cancel.is_cancelled() {
            return false;
        }
        if block.contains(&target) {
            cancel.cancel();
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(data: Vec<i32>, target: i32, threads: usize) -> bool {
        run(Arc::new(data), target, &RunOptions::strict(threads))
            .unwrap()
            .value
    }

    #[test]
    fn finds_a_single_occurrence_anywhere() {
        let mut data = vec![0; 10_000];
        for position in [0, 1, 4_999, 9_998, 9_999] {
            data[position] = 42;
            for threads in [1, 2, 4] {
                assert!(search(data.clone(), 42, threads), "position = {position}");
            }
            data[position] = 0;
        }
    }

    #[test]
    fn absent_target_reports_false() {
        let data: Vec<i32> = (0..5_000).collect();
        for threads in [1, 3, 5] {
            assert!(!search(data.clone(), -1, threads));
        }
    }

    #[test]
    fn many_occurrences_still_report_true() {
        let data = vec![7; 10_000];
        assert!(search(data, 7, 4));
    }

    #[test]
    fn empty_array_reports_false() {
        assert!(!search(Vec::new(), 1, 4));
    }

    #[test]
    fn result_is_independent_of_worker_count() {
        let data: Vec<i32> = (0..20_000).map(|i| i * 3).collect();
        for threads in 1..=6 {
            assert!(search(data.clone(), 2_997, threads));
            assert!(!search(data.clone(), 2_998, threads));
        }
    }

    #[test]
    fn best_effort_expiry_is_flagged_not_silent() {
        use crate::config::FailurePolicy;
        use std::time::Duration;

        // Absent target forces every task through its whole chunk, so a zero
        // deadline always expires first.
        let data = Arc::new(vec![0; 8_000_000]);
        let opts = RunOptions {
            threads: 2,
            failure_policy: FailurePolicy::BestEffort,
            join_timeout: Duration::ZERO,
        };
        let outcome = run(data, 1, &opts).unwrap();
        assert!(outcome.timed_out);
    }

    #[test]
    fn cancellation_leaves_the_answer_intact() {
        // Target sits in the first block, so the token trips immediately and
        // the remaining tasks mostly skip their chunks.
        let mut data = vec![0; 500_000];
        data[10] = 99;
        assert!(search(data, 99, 8));
    }
}
