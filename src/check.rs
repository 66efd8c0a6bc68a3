//! check command: cross-reference citations against the catalog
//!
//! Read-only. Loads the catalog, scans the corpus, reconciles, renders.

use crate::catalog::load_catalog;
use crate::config::CheckConfig;
use crate::error::CheckResult;
use crate::extract::CitationPatterns;
use crate::reconcile::reconcile;
use crate::render::{render, Format, ReportOutput};
use crate::scan::scan_corpus;
use crate::schema::{Outcome, RunSummary};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// YAML config file (root, content_dir, catalog, extension, reference_link)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base directory for the content directory and catalog
    #[arg(long, env = "CITECHECK_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory holding content documents (default: contenido)
    #[arg(long, env = "CITECHECK_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,

    /// Reference catalog (default: references.qmd)
    #[arg(long, env = "CITECHECK_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Content file extension (default: qmd)
    #[arg(long)]
    pub extension: Option<String>,

    /// Relative link target of linked citations (default: ../references.html)
    #[arg(long)]
    pub reference_link: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    /// Defaults, then the config file, then flags
    pub fn resolve_config(&self) -> CheckResult<CheckConfig> {
        let mut config = match &self.config {
            Some(path) => CheckConfig::from_yaml_file(path)?,
            None => CheckConfig::default(),
        };

        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(dir) = &self.content_dir {
            config.content_dir = dir.clone();
        }
        if let Some(catalog) = &self.catalog {
            config.catalog = catalog.clone();
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.trim_start_matches('.').to_string();
        }
        if let Some(link) = &self.reference_link {
            config.reference_link = link.clone();
        }

        Ok(config)
    }
}

/// Run the full check. Any I/O failure aborts with no partial summary.
pub fn check(config: &CheckConfig) -> CheckResult<RunSummary> {
    let catalog = load_catalog(&config.catalog_path())?;
    let patterns = CitationPatterns::new(&config.reference_link)?;
    let reports = scan_corpus(&config.content_dir_path(), &config.extension, &patterns)?;

    let summary = reconcile(&catalog, &reports);

    for doc in &summary.findings {
        tracing::warn!(
            document = %doc.document,
            missing = doc.missing.len(),
            unlinked = doc.unlinked.len(),
            "document flagged"
        );
    }
    tracing::info!(
        linked = summary.linked_citations,
        unlinked = summary.unlinked_citations,
        missing = summary.missing.len(),
        unused = summary.unused.len(),
        outcome = %summary.outcome,
        "check complete"
    );

    Ok(summary)
}

/// Run the check command and print the report to stdout
pub fn run_check(args: CheckArgs) -> Result<Outcome> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = args.resolve_config()?;
    let summary = check(&config)?;

    let output = ReportOutput::new(
        &summary,
        config.catalog_path().display().to_string(),
        config.content_dir_path().display().to_string(),
    );
    println!("{}", render(&output, args.format)?);

    Ok(summary.outcome)
}
