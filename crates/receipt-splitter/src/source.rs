//! Discovery of input PDF documents.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::SplitError;

/// Returns `true` if `path` has a `.pdf` extension, ignoring case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Find the PDF documents under `input`.
///
/// `input` may be a single PDF file or a directory, which is scanned
/// recursively. Anything under `exclude` (the output directory) is skipped so
/// earlier results are never split again. The result is sorted.
///
/// # Errors
///
/// Returns [`SplitError::NoDocumentsFound`] if no PDF is found.
pub fn discover_documents(input: &Path, exclude: &Path) -> Result<Vec<PathBuf>, SplitError> {
    let mut docs = Vec::new();

    if input.is_file() {
        if is_pdf(input) {
            docs.push(input.to_path_buf());
        }
    } else if input.is_dir() {
        let excluded = canonical_or_self(exclude);
        let walker = WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !canonical_or_self(entry.path()).starts_with(&excluded));
        for entry in walker.filter_map(Result::ok) {
            if entry.file_type().is_file() && is_pdf(entry.path()) {
                docs.push(entry.into_path());
            }
        }
        docs.sort();
    }

    if docs.is_empty() {
        return Err(SplitError::NoDocumentsFound(input.to_path_buf()));
    }
    log::info!("found {} document(s) in {}", docs.len(), input.display());
    Ok(docs)
}

fn canonical_or_self(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
