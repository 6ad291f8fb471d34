use crate::block_id::DEFAULT_EMPTY_BLOCK;
use crate::error::{CensusError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Order of the lines in a saved report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportOrder {
    /// Scan order: the first block type met comes first.
    #[default]
    FirstSeen,
    /// Sorted by block id.
    Alphabetical,
}

/// Settings for counting and saving reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusConfig {
    /// Directory reports are written into. Created on first write.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Appended to report names that do not already end with it.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Block id treated as empty space and left out of reports.
    #[serde(default = "default_empty_block")]
    pub empty_block: String,
    /// Largest region (in blocks) a single count may scan. `null` disables the check.
    #[serde(default = "default_max_volume")]
    pub max_volume: Option<u64>,
    #[serde(default)]
    pub order: ReportOrder,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Recipes")
}
fn default_extension() -> String {
    ".txt".to_string()
}
fn default_empty_block() -> String {
    DEFAULT_EMPTY_BLOCK.to_string()
}
fn default_max_volume() -> Option<u64> {
    Some(256 * 256 * 256)
}

impl Default for CensusConfig {
    fn default() -> Self {
        CensusConfig {
            output_dir: default_output_dir(),
            extension: default_extension(),
            empty_block: default_empty_block(),
            max_volume: default_max_volume(),
            order: ReportOrder::default(),
        }
    }
}

impl CensusConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CensusError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CensusError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
