//! Run configuration
//!
//! Built-in defaults, optionally overlaid by a YAML file, then by CLI flags.

use crate::error::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the corpus and catalog live and how citations link to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Base directory; `content_dir` and `catalog` resolve against it
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub catalog: PathBuf,
    /// Recognized content extension, without the dot
    pub extension: String,
    /// Relative link target used by linked citations
    pub reference_link: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            content_dir: PathBuf::from("contenido"),
            catalog: PathBuf::from("references.qmd"),
            extension: "qmd".to_string(),
            reference_link: "../references.html".to_string(),
        }
    }
}

impl CheckConfig {
    /// Load from a YAML file; keys left out keep their defaults
    pub fn from_yaml_file(path: &Path) -> CheckResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CheckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| CheckError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is not a mapping; treat it as all defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn content_dir_path(&self) -> PathBuf {
        self.root.join(&self.content_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.catalog)
    }
}
