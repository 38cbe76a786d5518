//! Seeded workload generation.
//!
//! Generation happens once per kernel invocation on the calling thread, so a
//! single seeded generator is enough here; the only per-task RNGs live inside
//! the Monte Carlo kernel, where workers sample concurrently.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn rng_for(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Array of small values in `1..10`. At full benchmark size the sum of such
/// an array exceeds the 32-bit range, which is why the sum kernel carries a
/// 64-bit accumulator.
pub fn small_value_array(rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(1..10)).collect()
}

/// Uniform values over the full `i32` range, for the sort and search inputs.
pub fn scrambled_array(rng: &mut StdRng, len: usize) -> Vec<i32> {
    (0..len).map(|_| rng.gen()).collect()
}

/// Draws a search target that is guaranteed to be present in `data`.
pub fn present_target(rng: &mut StdRng, data: &[i32]) -> i32 {
    data[rng.gen_range(0..data.len())]
}

/// Real-valued signal in `[-1, 1)` for the DFT kernel.
pub fn signal(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}
