//! The page pipeline: text → fields → base name → free path → written page.
//!
//! [`Pipeline`] processes documents sequentially and page by page. A page
//! that cannot be named or written is reported as failed and the run moves on;
//! only finding no input documents at all stops a run.

use std::path::{Path, PathBuf};

use receipt_splitter_core::{
    CollisionIndex, CompiledRegistry, ExtractedFields, NameSynthesizer, compile, extract,
};

use crate::config::{Config, OUTPUT_EXTENSION};
use crate::document::{DocumentOpener, ReceiptDocument};
use crate::error::SplitError;
use crate::source::discover_documents;

/// Result of processing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    /// 1-based page number.
    pub page_number: usize,
    /// Number of pages in the document.
    pub total_pages: usize,
    /// Path of the written file, when the page succeeded.
    pub path: Option<PathBuf>,
    /// Why the page failed, when it did.
    pub error: Option<String>,
}

impl PageOutcome {
    /// Whether the page was written.
    pub fn succeeded(&self) -> bool {
        self.path.is_some()
    }
}

/// Counters for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Pages written.
    pub processed: usize,
    /// Pages in the document.
    pub total: usize,
}

/// Counters for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages written across all documents.
    pub processed: usize,
    /// Pages seen across all documents that could be opened.
    pub total: usize,
    /// Documents opened and processed.
    pub documents: usize,
    /// Documents that could not be opened.
    pub skipped_documents: usize,
}

impl RunSummary {
    /// `true` when every page of every document was written.
    pub fn is_complete(&self) -> bool {
        self.processed == self.total && self.skipped_documents == 0
    }

    fn add(&mut self, doc: DocumentSummary) {
        self.processed += doc.processed;
        self.total += doc.total;
        self.documents += 1;
    }
}

/// Callback trait for run progress.
///
/// All methods have empty defaults; `()` implements it as a no-op observer.
pub trait PipelineObserver {
    /// A document was opened.
    fn on_document_start(&mut self, _path: &Path, _pages: usize) {}

    /// A page finished, successfully or not.
    fn on_page(&mut self, _outcome: &PageOutcome) {}

    /// A document could not be opened and was skipped.
    fn on_document_error(&mut self, _path: &Path, _error: &SplitError) {}

    /// All pages of a document were processed and the document was closed.
    fn on_document_end(&mut self, _path: &Path, _summary: &DocumentSummary) {}
}

impl PipelineObserver for () {}

/// Compiled extraction patterns plus the name synthesizer.
///
/// This is the pure half of the pipeline, also used to inspect pages without
/// writing anything.
#[derive(Debug, Clone)]
pub struct PageNamer {
    registry: CompiledRegistry,
    synthesizer: NameSynthesizer,
}

impl PageNamer {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Core`] if a keyword pattern fails to compile.
    pub fn from_config(config: &Config) -> Result<Self, SplitError> {
        let registry = compile(&config.keyword_table())?;
        let synthesizer = NameSynthesizer::new(config.name_template())
            .with_require_value(config.app.require_value);
        Ok(Self {
            registry,
            synthesizer,
        })
    }

    /// Extract the fields of one page.
    pub fn fields(&self, text: &str) -> ExtractedFields {
        extract(text, &self.registry)
    }

    /// Build the base name for extracted fields.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Core`] when the page has no identifying data.
    pub fn base_name(&self, fields: &ExtractedFields) -> Result<String, SplitError> {
        Ok(self.synthesizer.synthesize(fields)?)
    }
}

/// Splits documents into single-page files named from their contents.
pub struct Pipeline<O: DocumentOpener> {
    namer: PageNamer,
    output_dir: PathBuf,
    index: CollisionIndex,
    opener: O,
}

impl<O: DocumentOpener> Pipeline<O> {
    /// Create a pipeline writing into the configured output folder.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Core`] if a keyword pattern fails to compile.
    pub fn new(config: &Config, opener: O) -> Result<Self, SplitError> {
        Ok(Self {
            namer: PageNamer::from_config(config)?,
            output_dir: config.folder.output_folder.clone(),
            index: CollisionIndex::new(),
            opener,
        })
    }

    /// The directory single-page files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Process every PDF under `input`.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NoDocumentsFound`] if `input` holds no PDF. Page
    /// and document failures are reported to `observer` instead.
    pub fn run(
        &mut self,
        input: &Path,
        observer: &mut impl PipelineObserver,
    ) -> Result<RunSummary, SplitError> {
        let paths = discover_documents(input, &self.output_dir)?;
        let mut summary = RunSummary::default();

        for path in paths {
            match self.opener.open(&path) {
                Ok(doc) => summary.add(self.process_document(doc, observer)),
                Err(e) => {
                    log::warn!("skipping {}: {e}", path.display());
                    observer.on_document_error(&path, &e);
                    summary.skipped_documents += 1;
                }
            }
        }

        log::info!(
            "processed {} of {} page(s) in {} document(s)",
            summary.processed,
            summary.total,
            summary.documents
        );
        Ok(summary)
    }

    /// Process every page of `doc`, then close it.
    pub fn process_document<D: ReceiptDocument>(
        &mut self,
        doc: D,
        observer: &mut impl PipelineObserver,
    ) -> DocumentSummary {
        let path = doc.path().to_path_buf();
        let total = doc.page_count();
        observer.on_document_start(&path, total);

        let mut summary = DocumentSummary {
            processed: 0,
            total,
        };
        for index in 0..total {
            let outcome = self.process_page(&doc, index);
            if outcome.succeeded() {
                summary.processed += 1;
            }
            observer.on_page(&outcome);
        }

        doc.close();
        observer.on_document_end(&path, &summary);
        summary
    }

    /// Process the page at 0-based `index`.
    pub fn process_page<D: ReceiptDocument>(&mut self, doc: &D, index: usize) -> PageOutcome {
        let mut outcome = PageOutcome {
            page_number: index + 1,
            total_pages: doc.page_count(),
            path: None,
            error: None,
        };
        match self.split_page(doc, index) {
            Ok(path) => outcome.path = Some(path),
            Err(e) => {
                log::info!(
                    "page {} of {} failed: {e}",
                    outcome.page_number,
                    doc.path().display()
                );
                outcome.error = Some(e.to_string());
            }
        }
        outcome
    }

    fn split_page<D: ReceiptDocument>(
        &mut self,
        doc: &D,
        index: usize,
    ) -> Result<PathBuf, SplitError> {
        let text = doc.page_text(index)?;
        let fields = self.namer.fields(&text);
        log::debug!(
            "page {} of {}: value={:?} recipient={:?} bank={:?}",
            index + 1,
            doc.path().display(),
            fields.value,
            fields.recipient,
            fields.bank
        );

        let base = self.namer.base_name(&fields)?;
        let dest = self.index.resolve(&self.output_dir, &base, OUTPUT_EXTENSION)?;
        doc.write_page(index, &dest)?;
        self.index.record(&dest);
        Ok(dest)
    }
}
