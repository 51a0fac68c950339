//! Simulation configuration (`keepaway.toml`).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

use crate::core::containment::RELIEF_DIVISOR;
use crate::core::types::{Item, StrategyKind};

/// Simulation configuration (TOML).
///
/// Missing fields default to the standard puzzle values.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimConfig {
    /// Rounds played under relief-division containment.
    pub relief_rounds: u32,

    /// Rounds played under modular-bound containment.
    pub bound_rounds: u32,

    /// Divisor applied after each inspection in relief runs.
    pub relief_divisor: Item,

    /// Emit a progress event every this many rounds.
    pub progress_interval: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            relief_rounds: 20,
            bound_rounds: 10_000,
            relief_divisor: RELIEF_DIVISOR,
            progress_interval: 1_000,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.relief_rounds == 0 {
            return Err(anyhow!("relief_rounds must be > 0"));
        }
        if self.bound_rounds == 0 {
            return Err(anyhow!("bound_rounds must be > 0"));
        }
        if self.relief_divisor == 0 {
            return Err(anyhow!("relief_divisor must be > 0"));
        }
        if self.progress_interval == 0 {
            return Err(anyhow!("progress_interval must be > 0"));
        }
        Ok(())
    }

    /// Configured round count for `kind`.
    pub fn rounds_for(&self, kind: StrategyKind) -> u32 {
        match kind {
            StrategyKind::Relief => self.relief_rounds,
            StrategyKind::Bound => self.bound_rounds,
        }
    }
}

/// Load config from a TOML file.
///
/// A missing file yields `SimConfig::default()`; every other read error is
/// reported.
pub fn load_config(path: &Path) -> Result<SimConfig> {
    let cfg = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<SimConfig>(&contents)
            .with_context(|| format!("parse config {}", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "config missing, using defaults");
            SimConfig::default()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read config {}", path.display()));
        }
    };
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!(path = %path.display(), ?cfg, "config resolved");
    Ok(cfg)
}
