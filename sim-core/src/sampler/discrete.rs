//! Discrete deviates built from repeated uniform comparisons.

use rand::Rng;

use crate::error::{Result, SimError, ensure_nonzero, ensure_positive, ensure_probability};
use crate::rng::uniform01;

/// Multiplications allowed per Poisson deviate before giving up.
pub const MAX_POISSON_ITERATIONS: u64 = 100_000;

/// Indicator `U < p` per element: `1` with probability `p`, else `0`.
pub fn bernoulli<R: Rng + ?Sized>(p: f64, size: usize, rng: &mut R) -> Result<Vec<u64>> {
    ensure_probability("p", p)?;
    ensure_nonzero("size", size)?;
    Ok((0..size).map(|_| u64::from(uniform01(rng) < p)).collect())
}

/// Binomial(n, p) as the elementwise sum of `n` Bernoulli(p) arrays.
///
/// Uniforms are consumed one full array at a time, so the cost is
/// `O(n · size)`. `n = 0` yields all zeros.
pub fn binomial<R: Rng + ?Sized>(n: u64, p: f64, size: usize, rng: &mut R) -> Result<Vec<u64>> {
    ensure_probability("p", p)?;
    ensure_nonzero("size", size)?;
    let mut out = vec![0u64; size];
    for _ in 0..n {
        for slot in out.iter_mut() {
            *slot += u64::from(uniform01(rng) < p);
        }
    }
    Ok(out)
}

/// Poisson(rate) by Knuth's multiplicative method.
///
/// Multiplies fresh uniforms into an accumulator starting at 1 until it
/// drops to `e^{-rate}` or below; the deviate is the multiplication
/// count minus one. Expected work is about `rate + 1` draws per deviate.
///
/// The threshold `e^{-rate}` must be a normal float, which holds up to a
/// rate of about 708. Past that it is subnormal or zero and the product of
/// uniforms underflows long before reaching it, so the threshold check is
/// what bounds the loop; [`MAX_POISSON_ITERATIONS`] is only a backstop.
///
/// ### Errors
/// - [`SimError::InvalidParameter`] if `rate` is not positive.
/// - [`SimError::DegenerateSample`] if `e^{-rate}` falls below
///   [`f64::MIN_POSITIVE`], or a deviate needs more than
///   [`MAX_POISSON_ITERATIONS`] multiplications.
pub fn poisson<R: Rng + ?Sized>(rate: f64, size: usize, rng: &mut R) -> Result<Vec<u64>> {
    ensure_positive("rate", rate)?;
    ensure_nonzero("size", size)?;

    let limit = (-rate).exp();
    if limit < f64::MIN_POSITIVE {
        return Err(SimError::DegenerateSample {
            distribution: "poisson",
            iterations: 0,
        });
    }

    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        let mut count = 0u64;
        let mut acc = 1.0;
        while acc > limit {
            if count == MAX_POISSON_ITERATIONS {
                return Err(SimError::DegenerateSample {
                    distribution: "poisson",
                    iterations: count,
                });
            }
            count += 1;
            acc *= uniform01(rng);
        }
        out.push(count - 1);
    }
    Ok(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::rng::create_rng;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn discrete_samplers_return_requested_size(
            seed in 0_u64..10_000,
            size in 1_usize..200,
            p in 0.0_f64..=1.0,
        ) {
            let mut rng = create_rng(seed);
            prop_assert_eq!(bernoulli(p, size, &mut rng).unwrap().len(), size);
            prop_assert_eq!(binomial(5, p, size, &mut rng).unwrap().len(), size);
            prop_assert_eq!(poisson(3.0, size, &mut rng).unwrap().len(), size);
        }

        #[test]
        fn binomial_never_exceeds_trials(seed in 0_u64..10_000, n in 0_u64..30, p in 0.0_f64..=1.0) {
            let mut rng = create_rng(seed);
            let xs = binomial(n, p, 50, &mut rng).unwrap();
            prop_assert!(xs.iter().all(|&x| x <= n));
        }
    }
}
