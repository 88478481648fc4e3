//! # Engine Configuration Module
//!
//! Single source of truth for every distance, velocity and weight used by the
//! analyzers. Components never hard-code a cutoff; they receive the relevant
//! threshold group by reference.
//!
//! ## Usage
//! ```rust
//! use ti_core::config::IntelConfig;
//!
//! let config = IntelConfig::default();
//! assert_eq!(config.map_control.control_radius, 400.0);
//! ```
//!
//! ## Environment Variables
//!
//! - `TI_CONFIG_PATH`: YAML or JSON file loaded by [`IntelConfig::from_env_or_default`]

mod thresholds_config;

pub use thresholds_config::{
    AdvantageThresholds, ExecuteThresholds, FormationThresholds, InformationThresholds,
    MapControlThresholds, MomentumThresholds, OutcomeThresholds, PatternThresholds,
    SpatialThresholds, StrategyThresholds, WorkerConfig,
};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Environment variable naming a config file.
pub const CONFIG_PATH_ENV: &str = "TI_CONFIG_PATH";

/// Full engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IntelConfig {
    #[validate]
    pub spatial: SpatialThresholds,
    #[validate]
    pub formation: FormationThresholds,
    #[validate]
    pub map_control: MapControlThresholds,
    #[validate]
    pub momentum: MomentumThresholds,
    #[validate]
    pub advantage: AdvantageThresholds,
    #[validate]
    pub execute: ExecuteThresholds,
    #[validate]
    pub information: InformationThresholds,
    #[validate]
    pub pattern: PatternThresholds,
    #[validate]
    pub outcome: OutcomeThresholds,
    #[validate]
    pub strategy: StrategyThresholds,
    #[validate]
    pub worker: WorkerConfig,
}

impl IntelConfig {
    /// Parse a YAML document. JSON is valid YAML, so this accepts both.
    /// Missing keys fall back to defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: IntelConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Load from the file named by `TI_CONFIG_PATH`, or use defaults.
    ///
    /// A set but unreadable or invalid file is logged and ignored.
    pub fn from_env_or_default() -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => match Self::from_path(&path) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "loaded analysis config");
                    cfg
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "ignoring analysis config");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Validate cross-field constraints (inverted bands, negative radii).
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}
