//! Corpus scanning
//!
//! Enumerates content documents and runs the extractor over each one.

use crate::error::{CheckError, CheckResult};
use crate::extract::CitationPatterns;
use crate::schema::DocumentReport;
use std::path::{Path, PathBuf};

/// Entries in `dir` named with exactly `extension`, in directory-listing order.
/// Only directories are skipped; anything else that cannot be read fails later
/// in extraction.
pub fn list_documents(dir: &Path, extension: &str) -> CheckResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CheckError::ContentDirMissing(dir.to_path_buf()));
    }

    let list_err = |source| CheckError::ContentDirRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        if entry.file_type().map_err(list_err)?.is_dir() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Extract every document under `dir`. The first unreadable file aborts.
pub fn scan_corpus(
    dir: &Path,
    extension: &str,
    patterns: &CitationPatterns,
) -> CheckResult<Vec<DocumentReport>> {
    let files = list_documents(dir, extension)?;
    tracing::info!("Scanning {} content files in {}", files.len(), dir.display());

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        let report = patterns.extract_document(file)?;
        tracing::debug!(
            file = %file.display(),
            linked = report.linked.len(),
            unlinked = report.unlinked.len(),
            "extracted citations"
        );
        reports.push(report);
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_list_documents_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("01-intro.qmd"), "").unwrap();
        fs::write(dir.path().join("02-tema.qmd"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::write(dir.path().join("qmd"), "").unwrap();
        fs::create_dir(dir.path().join("sub.qmd")).unwrap();

        let mut names: Vec<String> = list_documents(dir.path(), "qmd")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        // listing order is platform dependent
        names.sort();
        assert_eq!(names, vec!["01-intro.qmd", "02-tema.qmd"]);
    }

    #[test]
    fn test_missing_dir() {
        let err = list_documents(Path::new("no/such/contenido"), "qmd").unwrap_err();
        assert!(matches!(err, CheckError::ContentDirMissing(_)));
        assert!(err.to_string().contains("Content directory not found"));
    }

    #[test]
    fn test_scan_corpus() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.qmd"),
            "Spolsky ([2009](../references.html#Spolsky2009))\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.qmd"), "Brooks (1975) dijo\n").unwrap();

        let patterns = CitationPatterns::new("../references.html").unwrap();
        let reports = scan_corpus(dir.path(), "qmd", &patterns).unwrap();
        assert_eq!(reports.len(), 2);

        let linked: usize = reports.iter().map(|r| r.linked.len()).sum();
        let unlinked: usize = reports.iter().map(|r| r.unlinked.len()).sum();
        assert_eq!(linked, 1);
        assert_eq!(unlinked, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_member_aborts_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.qmd"),
            "Spolsky ([2009](../references.html#Spolsky2009))\n",
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.qmd"), dir.path().join("b.qmd")).unwrap();
        fs::create_dir(dir.path().join("c.qmd")).unwrap();

        let names: Vec<String> = list_documents(dir.path(), "qmd")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert!(names.contains(&"b.qmd".to_string()));
        assert!(!names.contains(&"c.qmd".to_string()));

        let patterns = CitationPatterns::new("../references.html").unwrap();
        let err = scan_corpus(dir.path(), "qmd", &patterns).unwrap_err();
        assert!(matches!(err, CheckError::DocumentRead { ref path, .. } if path.ends_with("b.qmd")));
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let patterns = CitationPatterns::new("../references.html").unwrap();
        assert!(scan_corpus(dir.path(), "qmd", &patterns).unwrap().is_empty());
    }
}
