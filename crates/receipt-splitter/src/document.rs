//! Page access and single-page output.
//!
//! The pipeline only talks to documents through [`ReceiptDocument`], so it can
//! be driven by in-memory documents in tests. [`LopdfReceipt`] is the
//! implementation backed by [lopdf](https://crates.io/crates/lopdf).

use std::fmt;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::SplitError;

/// A multi-page document whose pages can be read and split out.
pub trait ReceiptDocument {
    /// Where the document was loaded from.
    fn path(&self) -> &Path;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Linear text of the page at 0-based `index`. May be empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the text cannot be
    /// extracted.
    fn page_text(&self, index: usize) -> Result<String, SplitError>;

    /// Write the page at 0-based `index` to `dest` as a standalone document.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be extracted or the file cannot be
    /// written. No file is left at `dest` on failure.
    fn write_page(&self, index: usize, dest: &Path) -> Result<(), SplitError>;

    /// Release the document. The default simply drops it.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

/// Opens documents by path.
pub trait DocumentOpener {
    /// The document type produced.
    type Document: ReceiptDocument;

    /// Open the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn open(&self, path: &Path) -> Result<Self::Document, SplitError>;
}

/// A PDF document loaded with lopdf.
pub struct LopdfReceipt {
    path: PathBuf,
    inner: lopdf::Document,
    /// 1-based page numbers, in page order.
    page_numbers: Vec<u32>,
}

impl fmt::Debug for LopdfReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LopdfReceipt")
            .field("path", &self.path)
            .field("page_count", &self.page_numbers.len())
            .finish_non_exhaustive()
    }
}

impl LopdfReceipt {
    /// Load a PDF file.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Pdf`] if the file cannot be parsed or is encrypted.
    pub fn open(path: &Path) -> Result<Self, SplitError> {
        let inner = lopdf::Document::load(path)
            .map_err(|e| SplitError::Pdf(format!("failed to parse {}: {e}", path.display())))?;
        Self::from_document(path, inner)
    }

    /// Parse PDF bytes. `path` is only used for reporting.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Pdf`] if the bytes cannot be parsed or the
    /// document is encrypted.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, SplitError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| SplitError::Pdf(format!("failed to parse {}: {e}", path.display())))?;
        Self::from_document(path, inner)
    }

    fn from_document(path: &Path, inner: lopdf::Document) -> Result<Self, SplitError> {
        if inner.is_encrypted() {
            return Err(SplitError::Pdf(format!(
                "{} is encrypted and cannot be split",
                path.display()
            )));
        }
        // get_pages returns a BTreeMap keyed by 1-based page number
        let page_numbers = inner.get_pages().keys().copied().collect();
        Ok(Self {
            path: path.to_path_buf(),
            inner,
            page_numbers,
        })
    }

    fn page_number(&self, index: usize) -> Result<u32, SplitError> {
        self.page_numbers.get(index).copied().ok_or_else(|| {
            SplitError::Pdf(format!(
                "page index {index} out of range (0..{})",
                self.page_numbers.len()
            ))
        })
    }

    /// Build an in-memory copy of the document that holds only `page_number`.
    fn single_page(&self, page_number: u32) -> lopdf::Document {
        let mut doc = self.inner.clone();
        let others: Vec<u32> = self
            .page_numbers
            .iter()
            .copied()
            .filter(|&n| n != page_number)
            .collect();
        if !others.is_empty() {
            doc.delete_pages(&others);
        }
        doc.prune_objects();
        doc
    }
}

impl ReceiptDocument for LopdfReceipt {
    fn path(&self) -> &Path {
        &self.path
    }

    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, SplitError> {
        let page_number = self.page_number(index)?;
        self.inner.extract_text(&[page_number]).map_err(|e| {
            SplitError::Pdf(format!(
                "failed to extract text from page {page_number} of {}: {e}",
                self.path.display()
            ))
        })
    }

    fn write_page(&self, index: usize, dest: &Path) -> Result<(), SplitError> {
        let page_number = self.page_number(index)?;
        let write_err = |message: String| SplitError::Write {
            path: dest.to_path_buf(),
            message,
        };

        let dir = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut single = self.single_page(page_number);

        // Write next to the destination and move into place only when complete.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
        single
            .save_to(&mut tmp)
            .map_err(|e| write_err(e.to_string()))?;
        tmp.persist_noclobber(dest)
            .map_err(|e| write_err(e.error.to_string()))?;
        Ok(())
    }
}

/// Opens PDF files with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfOpener;

impl DocumentOpener for LopdfOpener {
    type Document = LopdfReceipt;

    fn open(&self, path: &Path) -> Result<Self::Document, SplitError> {
        LopdfReceipt::open(path)
    }
}
