//! Wall-clock measurement around one kernel invocation.

use std::time::{Duration, Instant};

/// Runs `f` once and returns its output together with the elapsed wall time.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}
