//! Error type shared by every sampler and simulation in the crate.

use thiserror::Error;

/// Failure raised at the boundary of a sampling or simulation operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A caller-supplied parameter is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A sampling loop hit its iteration cap without producing a deviate.
    #[error("{distribution} sampler gave up after {iterations} iterations")]
    DegenerateSample {
        distribution: &'static str,
        iterations: u64,
    },

    /// The distribution name is not one of [`crate::sampler::Distribution::names`].
    #[error("unknown distribution `{0}`")]
    UnknownDistribution(String),

    /// A `key=value` parameter whose value is not a number.
    #[error("parameter `{key}` has non-numeric value `{value}`")]
    ParseParameter { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Checks that `value` is a finite, strictly positive number.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(
            name,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

/// Checks that `p` is a probability in `[0, 1]`.
pub(crate) fn ensure_probability(name: &'static str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("must lie in [0, 1], got {p}")))
    }
}

/// Checks that a count-like parameter (size, dimension, length) is at least one.
pub(crate) fn ensure_nonzero(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        Err(SimError::invalid(name, "must be at least 1"))
    } else {
        Ok(())
    }
}
