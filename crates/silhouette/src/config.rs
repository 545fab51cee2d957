use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    batch::DEFAULT_SPLIT_THRESHOLD,
    error::{Result, SilhouetteError},
    types::Thresholds,
};

/// Run settings, loadable from a `.toml` or `.json` file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Raw threshold values; see [`Thresholds::from_values`]
    pub thresholds: Vec<f64>,
    /// Largest work range processed without splitting
    pub split_threshold: usize,
    /// Worker threads, one per core when absent
    pub threads: Option<usize>,
    /// Randomize input order before partitioning
    pub shuffle: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![Thresholds::DEFAULT_LOW, Thresholds::DEFAULT_HIGH],
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            threads: None,
            shuffle: true,
        }
    }
}

impl RunConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::from_values(&self.thresholds)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&fs::read_to_string(path)?),
            Some("json") => Self::from_json(&fs::read_to_string(path)?),
            _ => Err(SilhouetteError::UnsupportedConfigFormat(path.to_path_buf())),
        }
    }
}
