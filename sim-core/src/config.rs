//! Construction parameters for the three grid simulations.
//!
//! Each struct carries the canonical defaults and a `validate` that checks
//! the same domains the constructors enforce, so a front end can reject a
//! bad configuration before building anything.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError, ensure_nonzero, ensure_probability};

/// Epidemic grid parameters.
///
/// `p_infect` is the per-infected-neighbor transmission probability per
/// step; `p_recover` and `p_die` are per-step probabilities for an infected
/// cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpidemicConfig {
    pub rows: usize,
    pub cols: usize,
    pub init_infected: usize,
    pub p_infect: f64,
    pub p_recover: f64,
    pub p_die: f64,
}

impl Default for EpidemicConfig {
    fn default() -> Self {
        Self {
            rows: 60,
            cols: 60,
            init_infected: 5,
            p_infect: 0.3,
            p_recover: 0.02,
            p_die: 0.005,
        }
    }
}

impl EpidemicConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_nonzero("rows", self.rows)?;
        ensure_nonzero("cols", self.cols)?;
        ensure_probability("p_infect", self.p_infect)?;
        ensure_probability("p_recover", self.p_recover)?;
        ensure_probability("p_die", self.p_die)
    }
}

/// 2-D life grid parameters; `p_alive` is the initial live-cell density.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Life2dConfig {
    pub rows: usize,
    pub cols: usize,
    pub p_alive: f64,
}

impl Default for Life2dConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            p_alive: 0.2,
        }
    }
}

impl Life2dConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_nonzero("rows", self.rows)?;
        ensure_nonzero("cols", self.cols)?;
        ensure_probability("p_alive", self.p_alive)
    }
}

/// Elementary automaton parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Life1dConfig {
    pub length: usize,
    /// Wolfram rule number, `0..=255`.
    pub rule: u32,
    /// Number of past states kept for spacetime rendering.
    pub history: usize,
}

impl Default for Life1dConfig {
    fn default() -> Self {
        Self {
            length: 200,
            rule: 30,
            history: 200,
        }
    }
}

impl Life1dConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_nonzero("length", self.length)?;
        if self.rule > 255 {
            return Err(SimError::invalid(
                "rule",
                format!("must lie in 0..=255, got {}", self.rule),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        EpidemicConfig::default().validate().unwrap();
        Life2dConfig::default().validate().unwrap();
        Life1dConfig::default().validate().unwrap();
    }

    #[test]
    fn canonical_epidemic_defaults() {
        let cfg = EpidemicConfig::default();
        assert_eq!((cfg.rows, cfg.cols, cfg.init_infected), (60, 60, 5));
        assert_eq!(cfg.p_infect, 0.3);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let cfg = EpidemicConfig {
            p_die: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimError::InvalidParameter { name: "p_die", .. })
        ));

        let cfg = Life1dConfig {
            rule: 256,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = Life2dConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
