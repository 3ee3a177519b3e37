//! Pseudo-random deviates for nine textbook distributions.
//!
//! The free functions in [`continuous`] and [`discrete`] are the sampling
//! algorithms themselves. [`Distribution`] bundles a distribution with its
//! parameters so a front end can pick one by name and sample it uniformly.
//!
//! | Name | Parameters (defaults) | Method |
//! |---|---|---|
//! | `uniform` | a=0, b=1 | `a + (b−a)U` |
//! | `exponential` | lam=1 | inverse CDF |
//! | `erlang` | k=2, lam=1 | sum of `k` exponentials |
//! | `gamma` | shape=2, scale=1 | Marsaglia–Tsang |
//! | `normal` | mu=0, sigma=1 | Box–Muller |
//! | `weibull` | k=1.5, lam=1 | inverse CDF |
//! | `bernoulli` | p=0.5 | `U < p` |
//! | `binomial` | n=10, p=0.5 | sum of `n` Bernoullis |
//! | `poisson` | lam=1 | Knuth multiplicative |

pub mod continuous;
pub mod discrete;
pub mod params;

use std::fmt;

use rand::Rng;

use crate::error::{Result, SimError};
use crate::stats::{Histogram, Summary};

pub use continuous::{
    MAX_REJECTION_ATTEMPTS, erlang, exponential, gamma, normal, uniform, weibull,
};
pub use discrete::{MAX_POISSON_ITERATIONS, bernoulli, binomial, poisson};
pub use params::Params;

/// A distribution together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
    Uniform { a: f64, b: f64 },
    Exponential { rate: f64 },
    Erlang { k: u32, rate: f64 },
    Gamma { shape: f64, scale: f64 },
    Normal { mean: f64, sigma: f64 },
    Weibull { k: f64, lambda: f64 },
    Bernoulli { p: f64 },
    Binomial { n: u64, p: f64 },
    Poisson { rate: f64 },
}

const NAMES: [&str; 9] = [
    "uniform",
    "exponential",
    "erlang",
    "gamma",
    "normal",
    "weibull",
    "bernoulli",
    "binomial",
    "poisson",
];

impl Distribution {
    /// Names accepted by [`Distribution::parse`].
    pub fn names() -> &'static [&'static str] {
        &NAMES
    }

    /// Builds a distribution from its name and a `key=value,...` list.
    ///
    /// Missing keys take the defaults from the module table. Unknown keys are
    /// ignored with a warning. Parameter domains are checked when sampling.
    pub fn parse(name: &str, params: &str) -> Result<Self> {
        let p = Params::parse(params)?;
        let name = name.trim().to_ascii_lowercase();
        let (dist, known): (Self, &[&str]) = match name.as_str() {
            "uniform" => (
                Distribution::Uniform {
                    a: p.real(&["a"], 0.0),
                    b: p.real(&["b"], 1.0),
                },
                &["a", "b"][..],
            ),
            "exponential" => (
                Distribution::Exponential {
                    rate: p.real(&["lam", "lambda"], 1.0),
                },
                &["lam", "lambda"][..],
            ),
            "erlang" => {
                let k = p.count("k", 2)?;
                let k = u32::try_from(k).map_err(|_| SimError::invalid("k", "too large"))?;
                (
                    Distribution::Erlang {
                        k,
                        rate: p.real(&["lam", "lambda"], 1.0),
                    },
                    &["k", "lam", "lambda"][..],
                )
            }
            "gamma" => (
                Distribution::Gamma {
                    shape: p.real(&["shape"], 2.0),
                    scale: p.real(&["scale"], 1.0),
                },
                &["shape", "scale"][..],
            ),
            "normal" => (
                Distribution::Normal {
                    mean: p.real(&["mu"], 0.0),
                    sigma: p.real(&["sigma"], 1.0),
                },
                &["mu", "sigma"][..],
            ),
            "weibull" => (
                Distribution::Weibull {
                    k: p.real(&["k"], 1.5),
                    lambda: p.real(&["lam", "lambda"], 1.0),
                },
                &["k", "lam", "lambda"][..],
            ),
            "bernoulli" => (
                Distribution::Bernoulli {
                    p: p.real(&["p"], 0.5),
                },
                &["p"][..],
            ),
            "binomial" => (
                Distribution::Binomial {
                    n: p.count("n", 10)?,
                    p: p.real(&["p"], 0.5),
                },
                &["n", "p"][..],
            ),
            "poisson" => (
                Distribution::Poisson {
                    rate: p.real(&["lam", "lambda"], 1.0),
                },
                &["lam", "lambda"][..],
            ),
            _ => return Err(SimError::UnknownDistribution(name.to_string())),
        };

        for key in p.unknown_keys(known) {
            tracing::warn!(distribution = %dist.name(), key, "ignoring unknown parameter");
        }
        Ok(dist)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Uniform { .. } => "uniform",
            Distribution::Exponential { .. } => "exponential",
            Distribution::Erlang { .. } => "erlang",
            Distribution::Gamma { .. } => "gamma",
            Distribution::Normal { .. } => "normal",
            Distribution::Weibull { .. } => "weibull",
            Distribution::Bernoulli { .. } => "bernoulli",
            Distribution::Binomial { .. } => "binomial",
            Distribution::Poisson { .. } => "poisson",
        }
    }

    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Distribution::Bernoulli { .. }
                | Distribution::Binomial { .. }
                | Distribution::Poisson { .. }
        )
    }

    /// Draws `size` deviates.
    pub fn sample<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Samples> {
        tracing::trace!(distribution = self.name(), size, "sampling");
        let samples = match *self {
            Distribution::Uniform { a, b } => Samples::Continuous(uniform(a, b, size, rng)?),
            Distribution::Exponential { rate } => {
                Samples::Continuous(exponential(rate, size, rng)?)
            }
            Distribution::Erlang { k, rate } => Samples::Continuous(erlang(k, rate, size, rng)?),
            Distribution::Gamma { shape, scale } => {
                Samples::Continuous(gamma(shape, scale, size, rng)?)
            }
            Distribution::Normal { mean, sigma } => {
                Samples::Continuous(normal(mean, sigma, size, rng)?)
            }
            Distribution::Weibull { k, lambda } => {
                Samples::Continuous(weibull(k, lambda, size, rng)?)
            }
            Distribution::Bernoulli { p } => Samples::Discrete(bernoulli(p, size, rng)?),
            Distribution::Binomial { n, p } => Samples::Discrete(binomial(n, p, size, rng)?),
            Distribution::Poisson { rate } => Samples::Discrete(poisson(rate, size, rng)?),
        };
        Ok(samples)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Uniform { a, b } => write!(f, "uniform(a={a}, b={b})"),
            Distribution::Exponential { rate } => write!(f, "exponential(lam={rate})"),
            Distribution::Erlang { k, rate } => write!(f, "erlang(k={k}, lam={rate})"),
            Distribution::Gamma { shape, scale } => {
                write!(f, "gamma(shape={shape}, scale={scale})")
            }
            Distribution::Normal { mean, sigma } => write!(f, "normal(mu={mean}, sigma={sigma})"),
            Distribution::Weibull { k, lambda } => write!(f, "weibull(k={k}, lam={lambda})"),
            Distribution::Bernoulli { p } => write!(f, "bernoulli(p={p})"),
            Distribution::Binomial { n, p } => write!(f, "binomial(n={n}, p={p})"),
            Distribution::Poisson { rate } => write!(f, "poisson(lam={rate})"),
        }
    }
}

/// Deviates in generation order.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Continuous(Vec<f64>),
    Discrete(Vec<u64>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::Continuous(v) => v.len(),
            Samples::Discrete(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The values widened to `f64`.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            Samples::Continuous(v) => v.clone(),
            Samples::Discrete(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }

    pub fn summary(&self) -> Option<Summary> {
        Summary::of(&self.to_f64())
    }

    /// Equal-width `bins` for continuous data; unit-width integer bins for
    /// discrete data (`bins` is ignored).
    pub fn histogram(&self, bins: usize) -> Option<Histogram> {
        match self {
            Samples::Continuous(v) => Histogram::with_bins(v, bins),
            Samples::Discrete(v) => Histogram::integer(v),
        }
    }
}
