//! receipt-splitter-core: I/O-independent algorithms for receipt-splitter.
//!
//! This crate turns the text of one receipt page into a file name:
//!
//! - [`registry`]: keyword vocabularies and their compilation into patterns
//! - [`extract`]: value, recipient, and bank extraction from page text
//! - [`naming`]: template substitution and name normalization
//! - [`collision`]: `_<n>` numbering so outputs never overwrite each other
//!
//! Only [`collision`] touches the filesystem, and only to list and create
//! output directories.

pub mod collision;
pub mod error;
pub mod extract;
pub mod naming;
pub mod registry;

pub use collision::{CollisionIndex, next_file_name, resolve_from_disk};
pub use error::CoreError;
pub use extract::{ExtractedFields, extract};
pub use naming::{NameSynthesizer, NameTemplate, Placeholder, normalize, synthesize};
pub use registry::{BankAcronym, CompiledRegistry, KeywordTable, compile};
