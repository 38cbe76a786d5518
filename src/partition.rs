//! Work partitioning: splitting a linear index domain into contiguous chunks.

use std::ops::Range;

/// A half-open index range `[start, end)` assigned to one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Splits `[0, n)` into `threads` contiguous, pairwise-disjoint chunks.
///
/// Every chunk except the last holds `n / threads` indices; the last chunk
/// runs to `n` and absorbs the remainder, so the union is always exactly
/// `[0, n)`. When `n < threads` the leading chunks come out empty; callers
/// run them as no-op tasks rather than rejecting them.
pub fn partition(n: usize, threads: usize) -> Vec<Chunk> {
    assert!(threads >= 1, "partition requires at least one worker");
    let base = n / threads;
    (0..threads)
        .map(|i| {
            let start = i * base;
            let end = if i == threads - 1 { n } else { start + base };
            Chunk { start, end }
        })
        .collect()
}
