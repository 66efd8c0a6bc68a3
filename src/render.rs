//! Report rendering
//!
//! Text output is for people (colored, sectioned); JSON and YAML carry the
//! same summary for tooling.

use crate::schema::{Outcome, RunSummary};
use anyhow::Result;
use chrono::Utc;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
}

/// Machine-readable wrapper around the summary
#[derive(Debug, Serialize)]
pub struct ReportOutput<'a> {
    pub catalog: String,
    pub content_dir: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

impl<'a> ReportOutput<'a> {
    pub fn new(summary: &'a RunSummary, catalog: String, content_dir: String) -> Self {
        Self {
            catalog,
            content_dir,
            timestamp: Utc::now().to_rfc3339(),
            summary,
        }
    }
}

pub fn render_json(output: &ReportOutput<'_>) -> Result<String> {
    Ok(serde_json::to_string(output)?)
}

pub fn render_yaml(output: &ReportOutput<'_>) -> Result<String> {
    Ok(serde_yaml::to_string(output)?)
}

const RULE: &str = "═══════════════════════════════════════════════════════";

fn banner(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out, "{}", RULE.cyan())?;
    writeln!(out, "{}", format!("{:^55}", title).cyan())?;
    writeln!(out, "{}", RULE.cyan())?;
    writeln!(out)
}

pub fn render_text(output: &ReportOutput<'_>) -> Result<String> {
    let summary = output.summary;
    let mut out = String::new();

    banner(&mut out, "Reference Checker")?;
    writeln!(
        out,
        "{}",
        format!("Found {} references in {}", summary.catalog_size, output.catalog).blue()
    )?;
    writeln!(
        out,
        "{}\n",
        format!(
            "Scanned {} content files in {}",
            summary.documents_scanned, output.content_dir
        )
        .blue()
    )?;

    for doc in &summary.findings {
        writeln!(out, "{}", format!("⚠ {}", doc.document).yellow())?;

        if !doc.missing.is_empty() {
            writeln!(out, "   {}", "Missing references in catalog:".red())?;
            for m in &doc.missing {
                writeln!(out, "     - {} (line {})", m.id, m.line)?;
            }
        }

        if !doc.unlinked.is_empty() {
            writeln!(
                out,
                "   {}",
                "Citations without links (may need verification):".yellow()
            )?;
            for c in &doc.unlinked {
                writeln!(out, "     Line {}: {} ({})", c.line, c.author, c.year)?;
            }
        }
        writeln!(out)?;
    }

    banner(&mut out, "SUMMARY")?;
    writeln!(
        out,
        "{}",
        format!("✓ Linked citations: {}", summary.linked_citations).green()
    )?;
    writeln!(
        out,
        "{}",
        format!("⚠ Potential unlinked citations: {}", summary.unlinked_citations).yellow()
    )?;
    writeln!(
        out,
        "{}",
        format!("✗ Missing references: {}", summary.missing.len()).red()
    )?;
    writeln!(
        out,
        "{}\n",
        format!("Unused references: {}", summary.unused.len()).magenta()
    )?;

    if !summary.missing.is_empty() {
        writeln!(
            out,
            "{}",
            "Missing references that need to be added to the catalog:".red()
        )?;
        for id in &summary.missing {
            writeln!(out, "  - {}", id)?;
        }
        writeln!(out)?;
    }

    if !summary.unused.is_empty() {
        writeln!(
            out,
            "{}",
            "Unused references (declared in the catalog but never cited):".magenta()
        )?;
        for id in &summary.unused {
            writeln!(out, "  - {}", id)?;
        }
        writeln!(out)?;
    }

    let verdict = match summary.outcome {
        Outcome::Failure => "✗ Check failed: missing references found".red(),
        Outcome::Warning => {
            "⚠ Warning: potential unlinked citations found (manual verification recommended)"
                .yellow()
        }
        Outcome::Success => "✓ All checks passed!".green(),
    };
    writeln!(out, "{}", verdict)?;

    Ok(out)
}

pub fn render(output: &ReportOutput<'_>, format: Format) -> Result<String> {
    match format {
        Format::Text => render_text(output),
        Format::Json => render_json(output),
        Format::Yaml => render_yaml(output),
    }
}
