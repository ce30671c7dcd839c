//! Error types for discovery, PDF access, and the page pipeline.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Only
//! [`SplitError::NoDocumentsFound`] and configuration errors stop a run; the
//! rest are caught per page and turned into failed
//! [`PageOutcome`](crate::pipeline::PageOutcome)s.

use std::path::PathBuf;

use receipt_splitter_core::CoreError;
use thiserror::Error;

/// Error type for receipt splitting.
#[derive(Debug, Error)]
pub enum SplitError {
    /// No PDF documents were found under the input path.
    #[error("no documents found in {}", .0.display())]
    NoDocumentsFound(PathBuf),

    /// Error opening a PDF or extracting a page's text.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Error writing a single-page PDF.
    #[error("failed to write {}: {message}", path.display())]
    Write {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying cause.
        message: String,
    },

    /// Error loading or saving the configuration file.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An extraction, naming, or collision error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<lopdf::Error> for SplitError {
    fn from(err: lopdf::Error) -> Self {
        SplitError::Pdf(err.to_string())
    }
}

impl SplitError {
    /// Returns `true` for errors that end the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SplitError::NoDocumentsFound(_) | SplitError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_documents_found_names_path() {
        let err = SplitError::NoDocumentsFound(PathBuf::from("receipts"));
        assert_eq!(err.to_string(), "no documents found in receipts");
        assert!(err.is_fatal());
    }

    #[test]
    fn write_error_names_destination() {
        let err = SplitError::Write {
            path: PathBuf::from("out/a.pdf"),
            message: "disk full".to_string(),
        };
        assert!(err.to_string().contains("a.pdf"));
        assert!(err.to_string().contains("disk full"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn core_error_is_transparent() {
        let err: SplitError = CoreError::NoIdentifyingData {
            template: "{VALUE}".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "no identifying data for template '{VALUE}'");
        assert!(!err.is_fatal());
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SplitError = io_err.into();
        assert!(matches!(err, SplitError::Io(_)));
    }
}
