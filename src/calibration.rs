use std::hint::black_box;
use std::time::Instant;

use fp2::traits::Fp as FqTrait;
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};

use crate::error::StrategyError;
use crate::strategy::cost_table::FieldCosts;

// ========================================================
// Measuring the cost of GF(p^2) arithmetic
// ========================================================

/// Average time in nanoseconds, rounded to the nearest integer with ties
/// rounded up.
#[inline]
fn average_ns(total: u128, samples: usize) -> u64 {
    let samples = samples as u128;
    ((total + samples / 2) / samples) as u64
}

/// Time `samples` multiplications, squarings and inversions of random
/// elements of `Fq` and return the average cost of each.
///
/// The resulting constants are what the strategy optimiser consumes, so a
/// strategy can be tuned to the field (and machine) it will run on.
#[instrument(skip(rng), level = "debug")]
pub fn measure_field_costs<Fq: FqTrait, R: CryptoRng + RngCore>(
    rng: &mut R,
    samples: usize,
) -> Result<FieldCosts, StrategyError> {
    if samples == 0 {
        return Err(StrategyError::InvalidSampleCount);
    }

    let mut total_mul: u128 = 0;
    let mut total_sqr: u128 = 0;
    let mut total_inv: u128 = 0;

    for _ in 0..samples {
        let a = Fq::rand(rng);
        let b = Fq::rand(rng);

        let start = Instant::now();
        black_box(black_box(a) * black_box(b));
        total_mul += start.elapsed().as_nanos();

        let start = Instant::now();
        black_box(black_box(a).square());
        total_sqr += start.elapsed().as_nanos();

        let start = Instant::now();
        black_box(black_box(a).invert());
        total_inv += start.elapsed().as_nanos();
    }

    let costs = FieldCosts::new(
        average_ns(total_mul, samples),
        average_ns(total_sqr, samples),
        average_ns(total_inv, samples),
    );
    debug!(M = costs.M, S = costs.S, I = costs.I, "measured field costs");
    Ok(costs)
}
