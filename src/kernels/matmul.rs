//! Dense square matrix multiplication, one task per output row.
//!
//! Task `i` computes `c[i][j] = sum_k a[i][k] * b[k][j]` for every `j` and
//! writes the finished row straight into the shared output buffer. Rows are
//! disjoint across tasks, so the writes need no synchronization; there is no
//! aggregation step at all.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::RunOptions;
use crate::error::BenchError;
use crate::kernels::apply_policy;
use crate::output::SharedOutput;
use crate::pool::WorkerPool;

pub const LABEL: &str = "Matrix multiply";

/// Row-major square matrix of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<i32>,
    size: usize,
}

impl Matrix {
    pub fn from_vec(size: usize, data: Vec<i32>) -> Self {
        assert_eq!(data.len(), size * size);
        Matrix { data, size }
    }

    /// Random matrix with entries in `0..10`, the shape the benchmark feeds
    /// into every treatment.
    pub fn random(rng: &mut StdRng, size: usize) -> Self {
        let data = (0..size * size).map(|_| rng.gen_range(0..10)).collect();
        Matrix { data, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.size + col]
    }
}

/// Result of one multiply run. `product` is `None` only when the join
/// deadline expired under the best-effort policy: straggler tasks may still
/// be writing rows, so the partially filled buffer is not handed back.
pub struct MatMulOutcome {
    pub product: Option<Matrix>,
    pub timed_out: bool,
}

pub fn run(a: Arc<Matrix>, b: Arc<Matrix>, opts: &RunOptions) -> Result<MatMulOutcome, BenchError> {
    assert_eq!(a.size(), b.size(), "operands must have matching dimensions");
    let n = a.size();
    let out = SharedOutput::new(vec![0i32; n * n]);
    let pool = WorkerPool::new(opts.threads);

    let handles: Vec<_> = (0..n)
        .map(|row| {
            let a = Arc::clone(&a);
            let b = Arc::clone(&b);
            let out = Arc::clone(&out);
            pool.submit(move || {
                // This task is the sole writer of row `row`.
                let dest = unsafe { out.slice_mut(row * n..(row + 1) * n) };
                for (col, cell) in dest.iter_mut().enumerate() {
                    let mut acc = 0i32;
                    for k in 0..n {
                        acc += a.get(row, k) * b.get(k, col);
                    }
                    *cell = acc;
                }
            })
        })
        .collect();

    let outcome = pool.join_deadline(handles, opts.join_timeout);
    let joined = apply_policy(LABEL, outcome, opts)?;
    if joined.timed_out {
        return Ok(MatMulOutcome {
            product: None,
            timed_out: true,
        });
    }

    pool.shutdown();
    let data = SharedOutput::into_inner(out).expect("all row tasks joined");
    Ok(MatMulOutcome {
        product: Some(Matrix { data, size: n }),
        timed_out: false,
    })
}

/// Naive sequential multiply, the reference the parallel kernel is checked
/// against.
pub fn multiply_seq(a: &Matrix, b: &Matrix) -> Matrix {
    assert_eq!(a.size(), b.size());
    let n = a.size();
    let mut data = vec![0i32; n * n];
    for row in 0..n {
        for col in 0..n {
            let mut acc = 0i32;
            for k in 0..n {
                acc += a.get(row, k) * b.get(k, col);
            }
            data[row * n + col] = acc;
        }
    }
    Matrix { data, size: n }
}
