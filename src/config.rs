//! Loader and clustering configuration.
//!
//! Both configs deserialize from JSON with every field optional; missing
//! fields take their defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Similarity threshold at or above which a node joins a cluster.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Per-member darkening applied to a cluster's base color.
pub const DEFAULT_SHADE_STEP: u8 = 30;

/// Temporary-file settings for [`crate::loader::DagLoader`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory for the scoped temporary file. `None` uses the system
    /// temp directory.
    pub temp_dir: Option<PathBuf>,
    pub temp_suffix: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { temp_dir: None, temp_suffix: ".dot".into() }
    }
}

impl LoaderConfig {
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.temp_suffix.is_empty() {
            return Err(Error::InvalidConfig("temp_suffix must not be empty".into()));
        }
        Ok(())
    }
}

/// Parameters for clustering and coloring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub threshold: f64,
    pub shade_step: u8,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD, shade_step: DEFAULT_SHADE_STEP }
    }
}

impl ClusterConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
