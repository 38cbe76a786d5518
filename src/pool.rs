//! Fixed-size worker pool with explicit per-task results.
//!
//! Workers loop on a shared job channel; at most `size` tasks run at once.
//! Each submission hands back a [`TaskHandle`] carrying the task's result or
//! its failure, so nothing gets lost between a worker and the join point. A
//! pool lives for exactly one kernel invocation: created, used, shut down.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};

use crate::error::TaskError;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// The pending result of one submitted task.
pub struct TaskHandle<T> {
    rx: Receiver<Result<T, TaskError>>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the task finishes.
    pub fn wait(self) -> Result<T, TaskError> {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(TaskError::Lost),
        }
    }

    fn wait_deadline(&self, deadline: Instant) -> Option<Result<T, TaskError>> {
        match self.rx.recv_deadline(deadline) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(TaskError::Lost)),
        }
    }
}

/// What a bounded join produced: the results that arrived before the
/// deadline, in submission order, and whether the deadline expired first.
pub struct JoinOutcome<T> {
    pub results: Vec<Result<T, TaskError>>,
    pub timed_out: bool,
    pub submitted: usize,
}

/// A fixed-size set of worker threads accepting unit-of-work submissions.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "pool needs at least one worker");

        let (sender, receiver) = unbounded::<Job>();
        let workers = (0..size)
            .map(|id| {
                let rx = receiver.clone();
                thread::Builder::new()
                    .name(format!("bench-worker-{id}"))
                    .spawn(move || {
                        while let Ok(job) = rx.recv() {
                            job();
                        }
                    })
                    .expect("failed to spawn worker thread")
            })
            .collect();

        WorkerPool {
            sender: Some(sender),
            workers,
        }
    }

    /// Submits one unit of work for asynchronous execution.
    ///
    /// A panic inside the closure is captured and reported through the
    /// handle as [`TaskError::Panicked`]; it never unwinds the worker and is
    /// never silently discarded.
    pub fn submit<T, F>(&self, task: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task))
                .map_err(|payload| TaskError::Panicked(panic_message(payload.as_ref())));
            // The join side may have given up already; that is its call.
            let _ = tx.send(outcome);
        });
        self.sender
            .as_ref()
            .expect("submit after shutdown")
            .send(job)
            .expect("all workers exited");
        TaskHandle { rx }
    }

    /// Blocks without a deadline until every handle completes, returning
    /// results in submission order and short-circuiting on the first failed
    /// task. The kernels all join through the bounded
    /// [`join_deadline`](Self::join_deadline); this form is for callers that
    /// genuinely want an unbounded wait.
    pub fn join<T>(&self, handles: Vec<TaskHandle<T>>) -> Result<Vec<T>, TaskError> {
        handles.into_iter().map(TaskHandle::wait).collect()
    }

    /// Bounded variant of [`join`](Self::join): a single deadline covers the
    /// whole batch. On expiry the outcome holds whatever results arrived in
    /// time; undelivered tasks keep running on the workers regardless.
    pub fn join_deadline<T>(&self, handles: Vec<TaskHandle<T>>, timeout: Duration) -> JoinOutcome<T> {
        let deadline = Instant::now() + timeout;
        let submitted = handles.len();
        let mut results = Vec::with_capacity(submitted);
        for handle in handles {
            match handle.wait_deadline(deadline) {
                Some(outcome) => results.push(outcome),
                None => {
                    return JoinOutcome {
                        results,
                        timed_out: true,
                        submitted,
                    }
                }
            }
        }
        JoinOutcome {
            results,
            timed_out: false,
            submitted,
        }
    }

    /// Stops intake and waits for the workers to drain the queue and exit.
    /// Outstanding work runs to completion first.
    pub fn shutdown(mut self) {
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl Drop for WorkerPool {
    /// Dropping the pool closes intake but does not wait: remaining jobs
    /// finish on detached workers. Use [`shutdown`](Self::shutdown) for a
    /// quiescent stop.
    fn drop(&mut self) {
        self.sender.take();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

/// A shared cancellation flag.
///
/// Long-running scan loops poll the token at a fixed stride and bail out once
/// it trips, so an early answer actually stops the losing tasks instead of
/// letting them run their chunks to completion.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
