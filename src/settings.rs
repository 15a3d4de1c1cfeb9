use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use crate::hits::FractionParts;

/// Run configuration. Every field may come from a JSON file; CLI flags
/// override whatever the file sets.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    pub aois_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub fraction_parts: FractionParts,
    pub parallel: bool,
    pub stats_path: Option<PathBuf>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            aois_path: None,
            output_dir: None,
            fraction_parts: FractionParts::default(),
            parallel: true,
            stats_path: None,
        }
    }
}

impl PipelineSettings {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    /// Defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}
