use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::boundary::BoundaryConfig;
use crate::classifier::ClassifierConfig;
use crate::reference::ReferencePaths;

/// Run configuration; every section falls back to its defaults
///
/// ```toml
/// [boundary]
/// sample_pages = 20
/// page_connector = "de"
///
/// [classifier]
/// gerund_endings = ["ando", "iendo"]
///
/// [reference]
/// mappings = "mappings.yml"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub boundary: BoundaryConfig,
    pub classifier: ClassifierConfig,
    pub reference: ReferencePaths,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Load a TOML config file; a file that was asked for must be readable
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In config {}", path.display()))
    }
}
