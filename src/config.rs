use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "pagetree.toml";

/// Name given to synthesized fallback sections
pub const DEFAULT_FALLBACK_SECTION_NAME: &str = "[untitled section]";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub output: OutputConfig,
    pub segmenter: SegmenterConfig,
}

/// Where documents are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding one sub-directory per document.
    pub documents_path: PathBuf,
    /// Page file extensions to load, without the dot.
    pub extensions: Vec<String>,
}

/// Where and how results are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub artifacts_path: PathBuf,
    /// Write `<name>_contents.txt` reports.
    pub report: bool,
    /// Write `<name>.json` trees.
    pub json: bool,
}

/// Segmentation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Sentinel name of the section created for paragraphs in a chapter with no section.
    pub fallback_section_name: String,
    /// Upper bound on parallel workers; `None` uses one per core.
    pub max_workers: Option<usize>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            documents_path: PathBuf::from("data"),
            extensions: vec!["txt".to_string(), "md".to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            artifacts_path: PathBuf::from("artifacts"),
            report: true,
            json: false,
        }
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            fallback_section_name: DEFAULT_FALLBACK_SECTION_NAME.to_string(),
            max_workers: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match Self::from_toml(&contents) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unparseable config");
                Self::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
