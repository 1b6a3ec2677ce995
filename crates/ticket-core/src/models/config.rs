//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the ticket pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    /// Data file locations.
    pub data: DataConfig,

    /// Receipt line heuristics.
    pub parser: ParserConfig,
}

/// Locations of the dictionary, correction store and trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory containing the data files.
    pub data_dir: PathBuf,

    /// Category dictionary file name (produced by the catalog scraper).
    pub dictionary: String,

    /// Correction store file name.
    pub corrections: String,

    /// Persisted classifier snapshot file name.
    pub trained_model: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dictionary: "categoryArray.json".to_string(),
            corrections: "corrections.json".to_string(),
            trained_model: "trainingData.json".to_string(),
        }
    }
}

/// Receipt line heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines of this many characters or fewer are never product names.
    pub min_line_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { min_line_length: 7 }
    }
}

impl TicketConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a data file.
    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.data.data_dir.join(file_name)
    }

    /// Point every data file at `dir`, keeping the file names.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data.data_dir = dir.into();
        self
    }
}
