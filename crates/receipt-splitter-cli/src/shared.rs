use std::io::Write;
use std::path::{Path, PathBuf};

use receipt_splitter::{
    Config, DEFAULT_CONFIG_FILE, DocumentSummary, LopdfReceipt, PageOutcome, PipelineObserver,
    RunSummary, SplitError,
};

use crate::page_range::parse_page_range;

/// Load the configuration named on the command line, or the default file.
///
/// An explicit path must exist. The default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, i32> {
    let result = match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    };
    result.map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Open a PDF file with user-friendly error messages.
pub fn open_pdf(file: &Path) -> Result<LopdfReceipt, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    LopdfReceipt::open(file).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Resolve an optional page range string into 0-indexed page indices.
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

/// Default output directory for an input given on the command line.
pub fn output_next_to(input: &Path) -> PathBuf {
    let base = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or(Path::new("."))
    };
    base.join("output")
}

/// File name of `path` for display.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Prints per-document and per-page status lines.
///
/// Write errors on the status stream are ignored; the run itself is not
/// affected by a closed pipe.
pub struct StatusReporter<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> StatusReporter<W> {
    /// Create a reporter. With `quiet` set only the summary is printed.
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    /// Print the run summary line.
    pub fn summary(&mut self, summary: &RunSummary) {
        let _ = writeln!(
            self.out,
            "Pages processed successfully: {} of {}",
            summary.processed, summary.total
        );
        if summary.skipped_documents > 0 {
            let _ = writeln!(
                self.out,
                "Documents skipped: {}",
                summary.skipped_documents
            );
        }
    }

    /// Consume the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PipelineObserver for StatusReporter<W> {
    fn on_document_start(&mut self, path: &Path, pages: usize) {
        if !self.quiet {
            let _ = writeln!(
                self.out,
                "Processing {} ({pages} page(s))...",
                display_name(path)
            );
        }
    }

    fn on_page(&mut self, outcome: &PageOutcome) {
        if self.quiet {
            return;
        }
        let status = match (&outcome.path, &outcome.error) {
            (Some(path), _) => format!("ok     {}", display_name(path)),
            (None, Some(error)) => format!("failed {error}"),
            (None, None) => "failed".to_string(),
        };
        let _ = writeln!(
            self.out,
            "  Page {} of {}  {status}",
            outcome.page_number, outcome.total_pages
        );
    }

    fn on_document_error(&mut self, path: &Path, error: &SplitError) {
        let _ = writeln!(self.out, "Skipping {}: {error}", display_name(path));
    }

    fn on_document_end(&mut self, _path: &Path, _summary: &DocumentSummary) {
        if !self.quiet {
            let _ = writeln!(self.out, "{}", "-".repeat(50));
        }
    }
}
