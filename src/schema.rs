//! Citation report schema
//!
//! Data produced by the extractor and consumed by the reconciler and renderers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Identifier of one bibliographic entry (`\w+`), shared by the catalog's
/// `:::{#Id}` entry and the `references.html#Id` link fragment.
pub type ReferenceId = String;

/// All identifiers declared in the reference catalog
pub type Catalog = BTreeSet<ReferenceId>;

/// A citation carrying an explicit link to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCitation {
    pub id: ReferenceId,
    /// 1-based line of the occurrence
    pub line: usize,
}

/// Author/year text with no link next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlinkedCitation {
    pub author: String,
    pub year: String,
    pub line: usize,
    /// Trimmed source line, for review
    pub text: String,
    /// Exact matched text, e.g. `Autor (2020)`
    pub raw: String,
}

/// Everything extracted from one content document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    /// Every linked occurrence in document order (ids may repeat)
    pub linked: Vec<LinkedCitation>,
    /// Unlinked citations in line order
    pub unlinked: Vec<UnlinkedCitation>,
}

impl DocumentReport {
    /// Distinct ids cited with a link in this document
    pub fn linked_ids(&self) -> BTreeSet<&str> {
        self.linked.iter().map(|c| c.id.as_str()).collect()
    }

    /// Line of the first linked occurrence of `id`
    pub fn first_line(&self, id: &str) -> Option<usize> {
        self.linked.iter().find(|c| c.id == id).map(|c| c.line)
    }

    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A linked id absent from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingReference {
    pub id: ReferenceId,
    pub line: usize,
}

/// A document with at least one missing reference or unlinked citation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFindings {
    pub document: String,
    pub missing: Vec<MissingReference>,
    pub unlinked: Vec<UnlinkedCitation>,
}

/// Run outcome, in decreasing severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// No missing references, no unlinked citations
    Success,
    /// Unlinked citations found, nothing missing
    Warning,
    /// At least one linked citation is absent from the catalog
    Failure,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Failure => 1,
            Outcome::Success | Outcome::Warning => 0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Warning => write!(f, "warning"),
            Outcome::Failure => write!(f, "failure"),
        }
    }
}

/// Totals across the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub catalog_size: usize,
    pub documents_scanned: usize,
    /// Sum of per-document distinct linked ids
    pub linked_citations: usize,
    pub unlinked_citations: usize,
    pub missing: BTreeSet<ReferenceId>,
    pub unused: BTreeSet<ReferenceId>,
    /// Flagged documents in scan order
    pub findings: Vec<DocumentFindings>,
    pub outcome: Outcome,
}
