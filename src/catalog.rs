//! Reference catalog loading
//!
//! The catalog declares one fenced entry per reference: `:::{#Spolsky2009}`
//! or `::: { #Spolsky2009 }`.

use crate::error::{CheckError, CheckResult};
use crate::schema::Catalog;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static ENTRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":::\s*\{\s*#((?-u:\w)+)\s*\}").expect("catalog entry pattern"));

/// Collect every declared reference id; duplicates collapse
pub fn parse_catalog(content: &str) -> Catalog {
    ENTRY_PATTERN
        .captures_iter(content)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Read the catalog file. Unreadable catalogs are fatal.
pub fn load_catalog(path: &Path) -> CheckResult<Catalog> {
    let content = std::fs::read_to_string(path).map_err(|source| CheckError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&content);
    tracing::info!(
        "Found {} references in {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}
