//! Layered configuration for the `simlab` binary.
//!
//! Hierarchy, later layers winning:
//! 1. Built-in defaults.
//! 2. The YAML file passed with `--config`, if any.
//! 3. `SIMLAB_*` environment variables, `__` separating nested keys
//!    (e.g. `SIMLAB_EPIDEMIC__P_INFECT=0.2`).
//! 4. Command-line flags, applied by the command handlers.

use std::path::Path;

use anyhow::{Context, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use sim_core::config::{EpidemicConfig, Life1dConfig, Life2dConfig};

/// Parameters for the `sample` command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub size: usize,
    pub bins: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            bins: 50,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub seed: Option<u64>,
    /// Steps run by each stepped simulation.
    pub steps: usize,
    /// Pause between steps in milliseconds; `0` runs flat out.
    pub interval_ms: u64,
    pub sample: SampleConfig,
    pub epidemic: EpidemicConfig,
    pub life2d: Life2dConfig,
    pub life1d: Life1dConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: None,
            steps: 50,
            interval_ms: 0,
            sample: SampleConfig::default(),
            epidemic: EpidemicConfig::default(),
            life2d: Life2dConfig::default(),
            life1d: Life1dConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads defaults, the optional YAML file, then `SIMLAB_*` variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(CliConfig::default()));

        if let Some(path) = path {
            if !path.exists() {
                bail!("configuration file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let cfg: CliConfig = figment
            .merge(Env::prefixed("SIMLAB_").split("__"))
            .extract()
            .context("failed to parse configuration")?;

        tracing::debug!(?cfg, "configuration loaded");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let cfg = CliConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg, CliConfig::default());
            Ok(())
        });
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "simlab.yaml",
                r#"
seed: 7
steps: 12
epidemic:
  rows: 20
  p_infect: 0.25
life1d:
  rule: 90
"#,
            )?;
            let cfg = CliConfig::load(Some(Path::new("simlab.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(cfg.seed, Some(7));
            assert_eq!(cfg.steps, 12);
            assert_eq!(cfg.epidemic.rows, 20);
            assert_eq!(cfg.epidemic.cols, 60);
            assert_eq!(cfg.epidemic.p_infect, 0.25);
            assert_eq!(cfg.life1d.rule, 90);
            assert_eq!(cfg.life1d.length, 200);
            assert_eq!(cfg.sample.bins, 50);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("simlab.yaml", "steps: 12\n")?;
            jail.set_env("SIMLAB_STEPS", "30");
            jail.set_env("SIMLAB_LIFE2D__P_ALIVE", "0.5");
            let cfg = CliConfig::load(Some(Path::new("simlab.yaml"))).map_err(|e| e.to_string())?;
            assert_eq!(cfg.steps, 30);
            assert_eq!(cfg.life2d.p_alive, 0.5);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            assert!(CliConfig::load(Some(Path::new("nope.yaml"))).is_err());
            Ok(())
        });
    }
}
