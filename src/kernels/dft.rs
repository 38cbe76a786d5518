//! Naive discrete Fourier transform, O(n²) on purpose.
//!
//! The harness wants a heavy, evenly divisible compute load, not a fast
//! transform; an FFT would defeat the measurement. Each task owns a disjoint
//! slice of frequency indices, reads the *entire* shared input vectors, and
//! writes only its own slice of the output. Reading everything while writing
//! a private region is safe precisely because the inputs are never mutated
//! during the pass.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::config::RunOptions;
use crate::error::BenchError;
use crate::kernels::apply_policy;
use crate::output::SharedOutput;
use crate::partition::partition;
use crate::pool::WorkerPool;

pub const LABEL: &str = "Naive DFT";

/// Frequency-domain output, split into real and imaginary parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub re: Vec<f64>,
    pub im: Vec<f64>,
}

/// Result of one transform run. Like the matrix kernel, `spectrum` is `None`
/// only when the deadline expired under the best-effort policy.
pub struct DftOutcome {
    pub spectrum: Option<Spectrum>,
    pub timed_out: bool,
}

pub fn run(
    input_re: Arc<Vec<f64>>,
    input_im: Arc<Vec<f64>>,
    opts: &RunOptions,
) -> Result<DftOutcome, BenchError> {
    assert_eq!(
        input_re.len(),
        input_im.len(),
        "real and imaginary inputs must have equal length"
    );
    let n = input_re.len();
    let out_re = SharedOutput::new(vec![0.0f64; n]);
    let out_im = SharedOutput::new(vec![0.0f64; n]);
    let pool = WorkerPool::new(opts.threads);

    let handles: Vec<_> = partition(n, opts.threads)
        .into_iter()
        .map(|chunk| {
            let input_re = Arc::clone(&input_re);
            let input_im = Arc::clone(&input_im);
            let out_re = Arc::clone(&out_re);
            let out_im = Arc::clone(&out_im);
            pool.submit(move || {
                // Sole writer of `chunk` in both output vectors.
                let dest_re = unsafe { out_re.slice_mut(chunk.range()) };
                let dest_im = unsafe { out_im.slice_mut(chunk.range()) };
                for (offset, k) in chunk.range().enumerate() {
                    let mut sum_re = 0.0;
                    let mut sum_im = 0.0;
                    for j in 0..n {
                        let angle = -2.0 * PI * (j as f64) * (k as f64) / (n as f64);
                        let (sin, cos) = angle.sin_cos();
                        sum_re += input_re[j] * cos - input_im[j] * sin;
                        sum_im += input_re[j] * sin + input_im[j] * cos;
                    }
                    dest_re[offset] = sum_re;
                    dest_im[offset] = sum_im;
                }
            })
        })
        .collect();

    let outcome = pool.join_deadline(handles, opts.join_timeout);
    let joined = apply_policy(LABEL, outcome, opts)?;
    if joined.timed_out {
        return Ok(DftOutcome {
            spectrum: None,
            timed_out: true,
        });
    }

    pool.shutdown();
    let spectrum = Spectrum {
        re: SharedOutput::into_inner(out_re).expect("all slice tasks joined"),
        im: SharedOutput::into_inner(out_im).expect("all slice tasks joined"),
    };
    Ok(DftOutcome {
        spectrum: Some(spectrum),
        timed_out: false,
    })
}
