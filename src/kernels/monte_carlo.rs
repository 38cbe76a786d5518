//! Monte Carlo estimation of pi.
//!
//! Each task owns an independent, separately seeded generator. Sharing one
//! RNG across workers would serialize them on contention and make the
//! estimate depend on scheduling; deriving each task's seed from the base
//! seed and its index keeps every run reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RunOptions;
use crate::error::BenchError;
use crate::kernels::{apply_policy, KernelOutcome};
use crate::partition::partition;
use crate::pool::WorkerPool;

pub const LABEL: &str = "Monte Carlo pi";

/// In-circle count and the number of points a task actually sampled. The
/// sampled count matters under the best-effort policy, where missing
/// partials must not deflate the estimate.
type Partial = (u64, usize);

pub fn run(
    total_points: usize,
    base_seed: u64,
    opts: &RunOptions,
) -> Result<KernelOutcome<f64>, BenchError> {
    let pool = WorkerPool::new(opts.threads);

    let handles: Vec<_> = partition(total_points, opts.threads)
        .into_iter()
        .enumerate()
        .map(|(task_index, chunk)| {
            let points = chunk.len();
            let seed = base_seed.wrapping_add(task_index as u64);
            pool.submit(move || sample(points, seed))
        })
        .collect();

    let outcome = pool.join_deadline(handles, opts.join_timeout);
    let partials = apply_policy(LABEL, outcome, opts)?;

    let mut inside = 0u64;
    let mut sampled = 0usize;
    for (hits, points) in &partials.values {
        inside += hits;
        sampled += points;
    }

    if !partials.timed_out {
        pool.shutdown();
    }
    let estimate = if sampled == 0 {
        0.0
    } else {
        4.0 * inside as f64 / sampled as f64
    };
    Ok(KernelOutcome {
        value: estimate,
        timed_out: partials.timed_out,
    })
}

fn sample(points: usize, seed: u64) -> Partial {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut inside = 0u64;
    for _ in 0..points {
        let x: f64 = rng.gen();
        let y: f64 = rng.gen();
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }
    (inside, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn estimate_converges_to_pi() {
        let estimate = run(1_000_000, 0xDBCA, &RunOptions::strict(4)).unwrap().value;
        assert!(
            (estimate - PI).abs() < 0.01,
            "estimate {estimate} too far from pi"
        );
    }

    #[test]
    fn same_seed_and_worker_count_reproduce_the_estimate() {
        let opts = RunOptions::strict(3);
        let first = run(100_000, 7, &opts).unwrap();
        let second = run(100_000, 7, &opts).unwrap();
        assert_eq!(first.value, second.value);
    }

    #[test]
    fn zero_points_yields_zero_instead_of_dividing_by_nothing() {
        assert_eq!(run(0, 1, &RunOptions::strict(2)).unwrap().value, 0.0);
    }

    #[test]
    fn uneven_point_counts_are_fully_sampled() {
        // 10_007 points over 4 workers leaves a remainder for the last task;
        // every point must still be drawn exactly once.
        let pool_free_total: usize = partition(10_007, 4).iter().map(|c| c.len()).sum();
        assert_eq!(pool_free_total, 10_007);

        let estimate = run(10_007, 3, &RunOptions::strict(4)).unwrap().value;
        assert!(estimate > 2.0 && estimate < 4.0);
    }

    #[test]
    fn best_effort_expiry_is_flagged_not_silent() {
        use crate::config::FailurePolicy;
        use std::time::Duration;

        let opts = RunOptions {
            threads: 2,
            failure_policy: FailurePolicy::BestEffort,
            join_timeout: Duration::ZERO,
        };
        let outcome = run(20_000_000, 1, &opts).unwrap();
        assert!(outcome.timed_out);
    }
}
