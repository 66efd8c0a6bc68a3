//! Citation extraction from content documents
//!
//! Two disjoint classes:
//! - linked: `[2009](../references.html#Spolsky2009)`
//! - unlinked: `Spolsky (2009)` with no link close by (heuristic, advisory)

use crate::error::{CheckError, CheckResult};
use crate::schema::{DocumentReport, LinkedCitation, UnlinkedCitation};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Capitalized name, optionally `X y Y` / `X and Y` / `X & Y`, then `(YYYY)`
static UNLINKED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)([A-Z][a-zá-ú]+(?:\s+(?:y|and|&)\s+[A-Z][a-zá-ú]+)?)\s*\(([0-9]{4})\)")
        .expect("unlinked citation pattern")
});

/// Characters kept before an unlinked match when looking for a link
const CONTEXT_BEFORE: usize = 5;
/// Characters kept after an unlinked match when looking for a link
const CONTEXT_AFTER: usize = 50;

/// Compiled patterns for one link target
#[derive(Debug, Clone)]
pub struct CitationPatterns {
    linked: Regex,
}

impl CitationPatterns {
    /// `reference_link` is the relative path content documents use to reach
    /// the catalog page, e.g. `../references.html`
    pub fn new(reference_link: &str) -> CheckResult<Self> {
        let linked = Regex::new(&format!(
            r"\[([0-9]{{4}})\]\({}#((?-u:\w)+)\)",
            regex::escape(reference_link)
        ))?;
        Ok(Self { linked })
    }

    /// Every linked citation in `content`, in order, with its line
    pub fn extract_linked(&self, content: &str) -> Vec<LinkedCitation> {
        let newlines: Vec<usize> = content.match_indices('\n').map(|(i, _)| i).collect();

        self.linked
            .captures_iter(content)
            .filter_map(|cap| {
                let start = cap.get(0)?.start();
                Some(LinkedCitation {
                    id: cap[2].to_string(),
                    line: newlines.partition_point(|&nl| nl < start) + 1,
                })
            })
            .collect()
    }

    /// Author/year mentions not already covered by a nearby link
    pub fn extract_unlinked(&self, content: &str) -> Vec<UnlinkedCitation> {
        let mut unlinked = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            for cap in UNLINKED_PATTERN.captures_iter(line) {
                let Some(whole) = cap.get(0) else { continue };

                let context = context_window(line, whole.start(), whole.end());
                if self.linked.is_match(context) {
                    continue;
                }

                unlinked.push(UnlinkedCitation {
                    author: cap[1].to_string(),
                    year: cap[2].to_string(),
                    line: idx + 1,
                    text: line.trim().to_string(),
                    raw: whole.as_str().to_string(),
                });
            }
        }

        unlinked
    }

    pub fn extract(&self, content: &str, path: &Path) -> DocumentReport {
        DocumentReport {
            path: path.to_path_buf(),
            linked: self.extract_linked(content),
            unlinked: self.extract_unlinked(content),
        }
    }

    /// Read and extract one document. Unreadable documents are fatal.
    pub fn extract_document(&self, path: &Path) -> CheckResult<DocumentReport> {
        let content = std::fs::read_to_string(path).map_err(|source| CheckError::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract(&content, path))
    }
}

/// Slice of `line` from a few characters before `start` to fifty characters
/// past `end`, clamped to the line and to char boundaries
fn context_window(line: &str, start: usize, end: usize) -> &str {
    let from = line[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_BEFORE - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = line[end..]
        .char_indices()
        .nth(CONTEXT_AFTER)
        .map(|(i, _)| end + i)
        .unwrap_or(line.len());
    &line[from..to]
}
