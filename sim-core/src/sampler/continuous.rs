//! Continuous deviates: inverse-CDF, Box–Muller and Marsaglia–Tsang.
//!
//! Every function takes the number of deviates `size` (at least 1) and
//! returns them in generation order.

use rand::Rng;

use crate::error::{Result, SimError, ensure_nonzero, ensure_positive};
use crate::rng::{box_muller, standard_normal, uniform01};

/// Attempts allowed per gamma deviate before giving up.
pub const MAX_REJECTION_ATTEMPTS: u64 = 10_000;

/// `a + (b − a)·U` elementwise.
///
/// `a ≤ b` is a precondition and is not checked; with `a > b` the values
/// fall in `(b, a]` instead.
pub fn uniform<R: Rng + ?Sized>(a: f64, b: f64, size: usize, rng: &mut R) -> Result<Vec<f64>> {
    ensure_nonzero("size", size)?;
    Ok((0..size).map(|_| a + (b - a) * uniform01(rng)).collect())
}

/// Inverse-CDF exponential: `−ln(1 − U) / rate`.
pub fn exponential<R: Rng + ?Sized>(rate: f64, size: usize, rng: &mut R) -> Result<Vec<f64>> {
    ensure_positive("rate", rate)?;
    ensure_nonzero("size", size)?;
    Ok((0..size).map(|_| exp_deviate(rate, rng)).collect())
}

#[inline]
fn exp_deviate<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> f64 {
    -(1.0 - uniform01(rng)).ln() / rate
}

/// Erlang(k, rate): each output is the sum of `k` exponential(rate) draws.
///
/// Draws are consumed row by row, `k` per output.
pub fn erlang<R: Rng + ?Sized>(k: u32, rate: f64, size: usize, rng: &mut R) -> Result<Vec<f64>> {
    if k == 0 {
        return Err(SimError::invalid("k", "must be a positive integer"));
    }
    ensure_positive("rate", rate)?;
    ensure_nonzero("size", size)?;
    Ok((0..size)
        .map(|_| (0..k).map(|_| exp_deviate(rate, rng)).sum())
        .collect())
}

/// Gamma(shape, scale).
///
/// ### Algorithm
/// - `shape ≥ 1`: Marsaglia–Tsang (2000) rejection with a standard-normal
///   candidate and one uniform per attempt.
/// - `shape < 1`: draw `G ~ Gamma(shape + 1, 1)` and return `G·U^{1/shape}`.
///
/// ### Errors
/// - [`SimError::InvalidParameter`] if `shape` or `scale` is not positive.
/// - [`SimError::DegenerateSample`] if a deviate needs more than
///   [`MAX_REJECTION_ATTEMPTS`] attempts.
pub fn gamma<R: Rng + ?Sized>(
    shape: f64,
    scale: f64,
    size: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    ensure_positive("shape", shape)?;
    ensure_positive("scale", scale)?;
    ensure_nonzero("size", size)?;
    (0..size)
        .map(|_| gamma_deviate(shape, rng).map(|g| g * scale))
        .collect()
}

fn gamma_deviate<R: Rng + ?Sized>(shape: f64, rng: &mut R) -> Result<f64> {
    if shape < 1.0 {
        let g = gamma_deviate(shape + 1.0, rng)?;
        let u = uniform01(rng);
        return Ok(g * u.powf(1.0 / shape));
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let x = standard_normal(rng);
        let v = 1.0 + c * x;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = uniform01(rng);
        let x2 = x * x;
        // Squeeze first, then the full log test.
        if u < 1.0 - 0.0331 * x2 * x2 || u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return Ok(d * v);
        }
    }
    Err(SimError::DegenerateSample {
        distribution: "gamma",
        iterations: MAX_REJECTION_ATTEMPTS,
    })
}

/// Normal(mean, sigma) by Box–Muller, two deviates per pair of uniforms.
///
/// With an odd `size` the spare deviate of the last pair is dropped.
pub fn normal<R: Rng + ?Sized>(mean: f64, sigma: f64, size: usize, rng: &mut R) -> Result<Vec<f64>> {
    if !mean.is_finite() {
        return Err(SimError::invalid("mean", format!("must be finite, got {mean}")));
    }
    if !(sigma.is_finite() && sigma >= 0.0) {
        return Err(SimError::invalid(
            "sigma",
            format!("must be finite and >= 0, got {sigma}"),
        ));
    }
    ensure_nonzero("size", size)?;

    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        let (z0, z1) = box_muller(rng);
        out.push(mean + sigma * z0);
        if out.len() < size {
            out.push(mean + sigma * z1);
        }
    }
    Ok(out)
}

/// Inverse-CDF Weibull: `lambda · (−ln(1 − U))^{1/k}`.
pub fn weibull<R: Rng + ?Sized>(k: f64, lambda: f64, size: usize, rng: &mut R) -> Result<Vec<f64>> {
    ensure_positive("k", k)?;
    ensure_positive("lambda", lambda)?;
    ensure_nonzero("size", size)?;
    let inv_k = 1.0 / k;
    Ok((0..size)
        .map(|_| lambda * (-(1.0 - uniform01(rng)).ln()).powf(inv_k))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use crate::stats::{mean, variance};

    const N: usize = 100_000;

    #[test]
    fn uniform_mean_and_range() {
        let mut rng = create_rng(42);
        let xs = uniform(0.0, 1.0, N, &mut rng).unwrap();
        assert_eq!(xs.len(), N);
        assert!(xs.iter().all(|x| (0.0..1.0).contains(x)));
        let m = mean(&xs).unwrap();
        assert!((m - 0.5).abs() < 0.02, "mean {m}");
    }

    #[test]
    fn uniform_shifts_and_scales() {
        let mut rng = create_rng(5);
        let xs = uniform(-3.0, 7.0, 1000, &mut rng).unwrap();
        assert!(xs.iter().all(|x| (-3.0..7.0).contains(x)));
    }

    #[test]
    fn exponential_mean_is_inverse_rate() {
        let mut rng = create_rng(42);
        let xs = exponential(2.0, N, &mut rng).unwrap();
        assert!(xs.iter().all(|&x| x >= 0.0));
        let m = mean(&xs).unwrap();
        assert!((m - 0.5).abs() < 0.5 * 0.05, "mean {m}");
    }

    #[test]
    fn exponential_rejects_non_positive_rate() {
        let mut rng = create_rng(0);
        assert!(matches!(
            exponential(0.0, 10, &mut rng),
            Err(SimError::InvalidParameter { name: "rate", .. })
        ));
        assert!(exponential(-1.0, 10, &mut rng).is_err());
    }

    #[test]
    fn erlang_mean_is_k_over_rate() {
        let mut rng = create_rng(42);
        let xs = erlang(3, 1.0, N, &mut rng).unwrap();
        assert_eq!(xs.len(), N);
        let m = mean(&xs).unwrap();
        assert!((m - 3.0).abs() < 3.0 * 0.05, "mean {m}");
    }

    #[test]
    fn erlang_matches_summed_exponentials_pointwise_for_same_stream() {
        let mut a = create_rng(11);
        let mut b = create_rng(11);
        let erl = erlang(3, 2.0, 4, &mut a).unwrap();
        let exps = exponential(2.0, 12, &mut b).unwrap();
        for (i, e) in erl.iter().enumerate() {
            let s: f64 = exps[i * 3..i * 3 + 3].iter().sum();
            assert!((e - s).abs() < 1e-12);
        }
    }

    #[test]
    fn erlang_rejects_zero_k() {
        let mut rng = create_rng(0);
        assert!(matches!(
            erlang(0, 1.0, 10, &mut rng),
            Err(SimError::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn gamma_moments_for_large_shape() {
        let mut rng = create_rng(42);
        let xs = gamma(2.5, 2.0, N, &mut rng).unwrap();
        let m = mean(&xs).unwrap();
        let v = variance(&xs).unwrap();
        // mean = shape·scale, variance = shape·scale²
        assert!((m - 5.0).abs() < 5.0 * 0.05, "mean {m}");
        assert!((v - 10.0).abs() < 10.0 * 0.1, "variance {v}");
    }

    #[test]
    fn gamma_boosted_branch_for_small_shape() {
        let mut rng = create_rng(42);
        let xs = gamma(0.5, 1.0, N, &mut rng).unwrap();
        assert!(xs.iter().all(|&x| x >= 0.0 && x.is_finite()));
        let m = mean(&xs).unwrap();
        assert!((m - 0.5).abs() < 0.5 * 0.05, "mean {m}");
    }

    #[test]
    fn gamma_rejects_non_positive_shape() {
        let mut rng = create_rng(0);
        assert!(gamma(0.0, 1.0, 5, &mut rng).is_err());
        assert!(gamma(1.0, -1.0, 5, &mut rng).is_err());
    }

    #[test]
    fn normal_mean_and_variance() {
        let mut rng = create_rng(42);
        let xs = normal(0.0, 1.0, N, &mut rng).unwrap();
        let m = mean(&xs).unwrap();
        let v = variance(&xs).unwrap();
        assert!(m.abs() < 0.02, "mean {m}");
        assert!((v - 1.0).abs() < 0.1, "variance {v}");
    }

    #[test]
    fn normal_odd_size_drops_spare_deviate() {
        let mut a = create_rng(9);
        let mut b = create_rng(9);
        let odd = normal(1.0, 2.0, 3, &mut a).unwrap();
        let even = normal(1.0, 2.0, 4, &mut b).unwrap();
        assert_eq!(odd.len(), 3);
        assert_eq!(&odd[..], &even[..3]);
    }

    #[test]
    fn normal_rejects_negative_sigma() {
        let mut rng = create_rng(0);
        assert!(normal(0.0, -1.0, 4, &mut rng).is_err());
    }

    #[test]
    fn weibull_with_k_one_is_exponential() {
        let mut rng = create_rng(42);
        let xs = weibull(1.0, 2.0, N, &mut rng).unwrap();
        let m = mean(&xs).unwrap();
        assert!((m - 2.0).abs() < 2.0 * 0.05, "mean {m}");
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut rng = create_rng(0);
        assert!(uniform(0.0, 1.0, 0, &mut rng).is_err());
        assert!(normal(0.0, 1.0, 0, &mut rng).is_err());
    }
}
