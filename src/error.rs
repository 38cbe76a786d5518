//! Error taxonomy for the harness.
//!
//! The original behavior this harness replaces swallowed task failures at the
//! join point and let kernels return silently incomplete results. Here every
//! failure is an explicit value: tasks report `TaskError`, kernels report
//! `BenchError`, and only the opt-in best-effort policy is allowed to keep
//! going past either.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The task body panicked; the payload message is preserved.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The worker dropped the task without ever producing a result.
    #[error("task was dropped before producing a result")]
    Lost,
}

/// Failure of one kernel invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchError {
    #[error("{kernel}: {source}")]
    TaskFailed {
        kernel: &'static str,
        source: TaskError,
    },

    #[error(
        "{kernel}: join deadline of {timeout:?} expired with {finished} of {submitted} tasks done"
    )]
    JoinTimeout {
        kernel: &'static str,
        timeout: Duration,
        finished: usize,
        submitted: usize,
    },
}
