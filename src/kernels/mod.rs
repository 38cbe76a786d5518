//! The six benchmark kernels.
//!
//! Every kernel follows the same shape: partition the domain, submit one task
//! per chunk (or per output row) to a fresh fixed-size pool, join against the
//! configured deadline, then aggregate under the failure policy.

pub mod dft;
pub mod matmul;
pub mod monte_carlo;
pub mod search;
pub mod sort;
pub mod sum;

use crate::config::{FailurePolicy, RunOptions};
use crate::error::BenchError;
use crate::pool::JoinOutcome;

/// A kernel's aggregated value plus whether its join hit the deadline.
///
/// `timed_out` is only ever `true` under the best-effort policy; strict runs
/// turn expiry into an error before a value exists. Callers must not treat a
/// flagged value as a finished result — it covers only the partials that
/// arrived in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelOutcome<T> {
    pub value: T,
    pub timed_out: bool,
}

/// Partial results that survived the join, plus whether the deadline expired
/// (only ever `true` under the best-effort policy).
#[derive(Debug)]
pub(crate) struct Partials<T> {
    pub values: Vec<T>,
    pub timed_out: bool,
}

/// Applies the configured failure policy to a joined batch.
///
/// Strict turns deadline expiry into [`BenchError::JoinTimeout`] and the
/// first task failure into [`BenchError::TaskFailed`]. Best-effort keeps the
/// successful partials and drops the rest, which is the old harness behavior
/// made explicit.
pub(crate) fn apply_policy<T>(
    kernel: &'static str,
    outcome: JoinOutcome<T>,
    opts: &RunOptions,
) -> Result<Partials<T>, BenchError> {
    match opts.failure_policy {
        FailurePolicy::Strict => {
            if outcome.timed_out {
                return Err(BenchError::JoinTimeout {
                    kernel,
                    timeout: opts.join_timeout,
                    finished: outcome.results.len(),
                    submitted: outcome.submitted,
                });
            }
            let mut values = Vec::with_capacity(outcome.results.len());
            for result in outcome.results {
                values.push(result.map_err(|source| BenchError::TaskFailed { kernel, source })?);
            }
            Ok(Partials {
                values,
                timed_out: false,
            })
        }
        FailurePolicy::BestEffort => Ok(Partials {
            values: outcome
                .results
                .into_iter()
                .filter_map(Result::ok)
                .collect(),
            timed_out: outcome.timed_out,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use std::time::Duration;

    fn opts(policy: FailurePolicy) -> RunOptions {
        RunOptions {
            threads: 2,
            failure_policy: policy,
            join_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn strict_surfaces_the_first_task_failure() {
        let outcome = JoinOutcome {
            results: vec![Ok(1), Err(TaskError::Panicked("boom".into())), Ok(3)],
            timed_out: false,
            submitted: 3,
        };
        let err = apply_policy("test", outcome, &opts(FailurePolicy::Strict)).unwrap_err();
        assert!(matches!(err, BenchError::TaskFailed { .. }));
    }

    #[test]
    fn strict_turns_expiry_into_an_error() {
        let outcome: JoinOutcome<i32> = JoinOutcome {
            results: vec![Ok(1)],
            timed_out: true,
            submitted: 4,
        };
        let err = apply_policy("test", outcome, &opts(FailurePolicy::Strict)).unwrap_err();
        assert!(matches!(
            err,
            BenchError::JoinTimeout {
                finished: 1,
                submitted: 4,
                ..
            }
        ));
    }

    #[test]
    fn best_effort_keeps_what_arrived() {
        let outcome = JoinOutcome {
            results: vec![Ok(1), Err(TaskError::Lost), Ok(3)],
            timed_out: true,
            submitted: 4,
        };
        let partials = apply_policy("test", outcome, &opts(FailurePolicy::BestEffort)).unwrap();
        assert_eq!(partials.values, vec![1, 3]);
        assert!(partials.timed_out);
    }
}
