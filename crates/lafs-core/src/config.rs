//! Run configuration.
//!
//! A configuration file is TOML with a `[parameters]` table holding the
//! [`ParameterSet`] plus optional `seed`, `[output]` and `[logging]` sections.
//! Environment variables prefixed `LAFS_` override file values; nested keys
//! use `__`, e.g. `LAFS_PARAMETERS__NUM_ITEMS=500` or `LAFS_OUTPUT__DIR=out`.
//! `LAFS_CONFIG` is reserved for the config file path.
//!
//! ```toml
//! seed = 42
//!
//! [parameters]
//! num_items = 100
//! num_factors = 3
//! num_agents = 1
//! agent_discount = [[0.5, 0.1]]
//! num_users_per_propensity = [20, 20]
//! initial_list_size = 30
//! recommendation_size = 10
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::ParameterSet;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "LAFS_";

/// Where and what to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created if missing.
    pub dir: PathBuf,
    /// Write `compatibilities_users_factors.csv` and `items_factors.csv`.
    pub write_profiles: bool,
    /// Write `user_latent_factors.csv` and `item_latent_factors.csv`.
    pub write_latent_factors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output"),
            write_profiles: true,
            write_latent_factors: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed of the shared random source; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Generation parameters.
    pub parameters: ParameterSet,
}

impl GeneratorConfig {
    /// Loads `path` with environment overrides and validates the parameters.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::extract(Figment::new().merge(Toml::file(path)))
    }

    /// Parses TOML text with environment overrides and validates it.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::extract(Figment::new().merge(Toml::string(toml)))
    }

    /// Environment provider for `LAFS_*` overrides.
    ///
    /// `LAFS_CONFIG` names the configuration file for the CLI and is not a
    /// setting, so it is skipped.
    #[must_use]
    pub fn env_overrides() -> Env {
        Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__")
    }

    fn extract(base: Figment) -> Result<Self> {
        let config: Self = base.merge(Self::env_overrides()).extract()?;
        config.parameters.validate()?;
        Ok(config)
    }
}
