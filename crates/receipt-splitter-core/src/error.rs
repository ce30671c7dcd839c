//! Error types for the extraction and naming layers.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Extraction itself never
//! fails; errors come from pattern compilation, name synthesis, and the
//! directory listing done by the collision resolver.

use thiserror::Error;

/// Error type for the I/O-independent core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The page yielded no value (or nothing at all) to build a file name from.
    #[error("no identifying data for template '{template}'")]
    NoIdentifyingData {
        /// The template that degenerated to an empty name.
        template: String,
    },

    /// A keyword vocabulary produced a pattern the regex engine rejected.
    #[error("invalid keyword pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Error creating or listing an output directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
