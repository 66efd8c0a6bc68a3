//! Reconciliation of extracted citations against the catalog
//!
//! Pure set algebra: no I/O, same input always gives the same summary.

use crate::schema::{
    Catalog, DocumentFindings, DocumentReport, MissingReference, Outcome, ReferenceId, RunSummary,
};
use std::collections::BTreeSet;

/// Linked ids of `report` that the catalog does not declare, in order of
/// first occurrence
pub fn missing_in(catalog: &Catalog, report: &DocumentReport) -> Vec<MissingReference> {
    let mut missing: Vec<MissingReference> = report
        .linked_ids()
        .into_iter()
        .filter(|id| !catalog.contains(*id))
        .map(|id| MissingReference {
            id: id.to_string(),
            line: report.first_line(id).unwrap_or(0),
        })
        .collect();
    missing.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.id.cmp(&b.id)));
    missing
}

/// Missing references dominate unlinked citations
pub fn outcome(missing: usize, unlinked: usize) -> Outcome {
    if missing > 0 {
        Outcome::Failure
    } else if unlinked > 0 {
        Outcome::Warning
    } else {
        Outcome::Success
    }
}

pub fn reconcile(catalog: &Catalog, reports: &[DocumentReport]) -> RunSummary {
    let mut linked_citations = 0;
    let mut unlinked_citations = 0;
    let mut cited: BTreeSet<&str> = BTreeSet::new();
    let mut missing: BTreeSet<ReferenceId> = BTreeSet::new();
    let mut findings = Vec::new();

    for report in reports {
        let ids = report.linked_ids();
        linked_citations += ids.len();
        unlinked_citations += report.unlinked.len();
        cited.extend(ids);

        let doc_missing = missing_in(catalog, report);
        missing.extend(doc_missing.iter().map(|m| m.id.clone()));

        if !doc_missing.is_empty() || !report.unlinked.is_empty() {
            findings.push(DocumentFindings {
                document: report.display_name(),
                missing: doc_missing,
                unlinked: report.unlinked.clone(),
            });
        }
    }

    let unused = catalog
        .iter()
        .filter(|id| !cited.contains(id.as_str()))
        .cloned()
        .collect();

    RunSummary {
        catalog_size: catalog.len(),
        documents_scanned: reports.len(),
        linked_citations,
        unlinked_citations,
        outcome: outcome(missing.len(), unlinked_citations),
        missing,
        unused,
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LinkedCitation, UnlinkedCitation};
    use std::path::PathBuf;

    fn catalog(ids: &[&str]) -> Catalog {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn doc(name: &str, linked: &[&str], unlinked: usize) -> DocumentReport {
        DocumentReport {
            path: PathBuf::from("contenido").join(name),
            linked: linked
                .iter()
                .enumerate()
                .map(|(i, id)| LinkedCitation {
                    id: id.to_string(),
                    line: i + 1,
                })
                .collect(),
            unlinked: (0..unlinked)
                .map(|i| UnlinkedCitation {
                    author: "Autor".to_string(),
                    year: "2020".to_string(),
                    line: i + 10,
                    text: "Autor (2020) propone...".to_string(),
                    raw: "Autor (2020)".to_string(),
                })
                .collect(),
        }
    }

    fn set(ids: &[&str]) -> BTreeSet<ReferenceId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_linked_success() {
        let summary = reconcile(&catalog(&["Spolsky2009"]), &[doc("a.qmd", &["Spolsky2009"], 0)]);
        assert_eq!(summary.linked_citations, 1);
        assert_eq!(summary.unlinked_citations, 0);
        assert!(summary.missing.is_empty());
        assert!(summary.unused.is_empty());
        assert!(summary.findings.is_empty());
        assert_eq!(summary.outcome, Outcome::Success);
    }

    #[test]
    fn test_unused_never_fails() {
        let cat = catalog(&["A", "B"]);

        let clean = reconcile(&cat, &[doc("a.qmd", &["A"], 0)]);
        assert_eq!(clean.unused, set(&["B"]));
        assert!(clean.missing.is_empty());
        assert_eq!(clean.outcome, Outcome::Success);

        let noisy = reconcile(&cat, &[doc("a.qmd", &["A"], 2)]);
        assert_eq!(noisy.unused, set(&["B"]));
        assert_eq!(noisy.outcome, Outcome::Warning);
    }

    #[test]
    fn test_ghost_reference_fails() {
        let summary = reconcile(
            &catalog(&["Spolsky2009"]),
            &[
                doc("a.qmd", &["Spolsky2009"], 3),
                doc("b.qmd", &["Ghost2099"], 0),
            ],
        );
        assert_eq!(summary.missing, set(&["Ghost2099"]));
        assert_eq!(summary.outcome, Outcome::Failure);
        assert_eq!(summary.outcome.exit_code(), 1);

        // missing is listed under the citing document only
        assert_eq!(summary.findings.len(), 2);
        assert!(summary.findings[0].missing.is_empty());
        assert_eq!(summary.findings[1].document, "b.qmd");
        assert_eq!(summary.findings[1].missing[0].id, "Ghost2099");
        assert_eq!(summary.findings[1].missing[0].line, 1);
    }

    #[test]
    fn test_cataloged_ids_never_missing() {
        let cat = catalog(&["A", "B", "C"]);
        let reports = [doc("a.qmd", &["A", "B", "X"], 0), doc("b.qmd", &["C", "Y"], 0)];
        let summary = reconcile(&cat, &reports);
        for id in &cat {
            assert!(!summary.missing.contains(id));
        }
        assert_eq!(summary.missing, set(&["X", "Y"]));
    }

    #[test]
    fn test_global_missing_is_union_of_documents() {
        let cat = catalog(&["A"]);
        let reports = [
            doc("a.qmd", &["A", "X"], 0),
            doc("b.qmd", &["X", "Y"], 1),
            doc("c.qmd", &["Z"], 0),
        ];
        let summary = reconcile(&cat, &reports);
        let union: BTreeSet<ReferenceId> = reports
            .iter()
            .flat_map(|r| missing_in(&cat, r))
            .map(|m| m.id)
            .collect();
        assert_eq!(summary.missing, union);
    }

    #[test]
    fn test_missing_follow_document_order() {
        let cat = catalog(&["A"]);
        let report = DocumentReport {
            path: PathBuf::from("contenido/a.qmd"),
            linked: vec![
                LinkedCitation { id: "Zeta2001".to_string(), line: 2 },
                LinkedCitation { id: "A".to_string(), line: 3 },
                LinkedCitation { id: "Beta2002".to_string(), line: 8 },
                LinkedCitation { id: "Alpha2003".to_string(), line: 8 },
                LinkedCitation { id: "Zeta2001".to_string(), line: 9 },
            ],
            unlinked: Vec::new(),
        };
        let missing: Vec<(String, usize)> = missing_in(&cat, &report)
            .into_iter()
            .map(|m| (m.id, m.line))
            .collect();
        assert_eq!(
            missing,
            vec![
                ("Zeta2001".to_string(), 2),
                ("Alpha2003".to_string(), 8),
                ("Beta2002".to_string(), 8),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let cat = catalog(&["A", "B", "C"]);
        let reports = [doc("a.qmd", &["C", "Q"], 1), doc("b.qmd", &["A"], 0)];
        let first = reconcile(&cat, &reports);
        let second = reconcile(&cat, &reports);
        assert_eq!(first.missing, second.missing);
        assert_eq!(first.unused, second.unused);
        assert_eq!(first.outcome, second.outcome);
    }

    #[test]
    fn test_linked_count_is_per_document_distinct() {
        let cat = catalog(&["A", "B"]);
        let summary = reconcile(
            &cat,
            &[doc("a.qmd", &["A", "A", "B"], 0), doc("b.qmd", &["A"], 0)],
        );
        assert_eq!(summary.linked_citations, 3);
        assert_eq!(summary.documents_scanned, 2);
        assert_eq!(summary.catalog_size, 2);
    }

    #[test]
    fn test_findings_keep_scan_order() {
        let cat = catalog(&["A"]);
        let summary = reconcile(
            &cat,
            &[doc("z.qmd", &[], 1), doc("m.qmd", &["A"], 0), doc("a.qmd", &[], 2)],
        );
        let names: Vec<&str> = summary.findings.iter().map(|f| f.document.as_str()).collect();
        assert_eq!(names, vec!["z.qmd", "a.qmd"]);
        assert_eq!(summary.unlinked_citations, 3);
    }

    #[test]
    fn test_outcome_priority() {
        assert_eq!(outcome(0, 0), Outcome::Success);
        assert_eq!(outcome(0, 5), Outcome::Warning);
        assert_eq!(outcome(1, 0), Outcome::Failure);
        assert_eq!(outcome(1, 5), Outcome::Failure);
    }

    #[test]
    fn test_empty_corpus() {
        let summary = reconcile(&catalog(&["A"]), &[]);
        assert_eq!(summary.unused, set(&["A"]));
        assert_eq!(summary.outcome, Outcome::Success);
    }
}
