//! receipt-splitter: split multi-page receipt PDFs into single-page files.
//!
//! Each page is written to its own PDF, named from the monetary value, the
//! recipient, and the bank found in the page's text.
//!
//! # Architecture
//!
//! - **receipt-splitter-core**: extraction, naming, and collision numbering
//! - **receipt-splitter** (this crate): configuration, discovery, lopdf-backed
//!   page access, and the [`Pipeline`] that ties everything together
//!
//! # Example
//!
//! ```no_run
//! use receipt_splitter::{Config, LopdfOpener, Pipeline};
//!
//! let config = Config::default();
//! let mut pipeline = Pipeline::new(&config, LopdfOpener)?;
//! let summary = pipeline.run(&config.folder.input_folder, &mut ())?;
//! println!("{} of {} pages written", summary.processed, summary.total);
//! # Ok::<(), receipt_splitter::SplitError>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod source;

pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use document::{DocumentOpener, LopdfOpener, LopdfReceipt, ReceiptDocument};
pub use error::SplitError;
pub use pipeline::{
    DocumentSummary, PageNamer, PageOutcome, Pipeline, PipelineObserver, RunSummary,
};
pub use receipt_splitter_core;
pub use receipt_splitter_core::{ExtractedFields, NameTemplate};
pub use source::discover_documents;
