//! Fatal errors. Any of these aborts the run before a report is produced.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Content directory not found: {}", .0.display())]
    ContentDirMissing(PathBuf),

    #[error("Failed to list content directory {}: {source}", path.display())]
    ContentDirRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read file: {}: {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid citation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type CheckResult<T> = Result<T, CheckError>;
