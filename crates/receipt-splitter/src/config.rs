//! Run configuration, stored as TOML.
//!
//! A [`Config`] is loaded once at startup and passed by reference to the
//! pipeline. Every field has a default, so a partial file (or none at all)
//! still yields a usable configuration.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use receipt_splitter_core::{BankAcronym, KeywordTable, NameTemplate};
use serde::{Deserialize, Serialize};

use crate::error::SplitError;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "receipt-splitter.toml";

/// Default file name template.
pub const DEFAULT_TEMPLATE: &str = "{VALUE} - {RECIPIENT} - {BANK}";

/// Extension of the written files.
pub const OUTPUT_EXTENSION: &str = "pdf";

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyword vocabularies and naming policy.
    pub app: AppConfig,
    /// Input and output locations and the file name template.
    pub folder: FolderConfig,
}

/// The `[app]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Title shown in the run banner.
    pub title: String,
    /// Words that precede a monetary value.
    pub value_keywords: Vec<String>,
    /// Phrases that precede the recipient's name.
    pub recipient_keywords: Vec<String>,
    /// Whether pages without a monetary value are treated as failures.
    pub require_value: bool,
    /// Full bank name to acronym, matched in order.
    pub bank_acronyms: Vec<BankAcronym>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let keywords = KeywordTable::default();
        Self {
            title: "Receipt splitter".to_string(),
            value_keywords: keywords.value_keywords,
            recipient_keywords: keywords.recipient_keywords,
            require_value: true,
            bank_acronyms: keywords.bank_acronyms,
        }
    }
}

/// The `[folder]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderConfig {
    /// A PDF file, or a directory scanned recursively for PDF files.
    pub input_folder: PathBuf,
    /// Where single-page files are written. Skipped when scanning the input.
    pub output_folder: PathBuf,
    /// File name template with `{VALUE}`, `{RECIPIENT}` and `{BANK}`.
    pub output_filename: String,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("receipts"),
            output_folder: Path::new("receipts").join("output"),
            output_filename: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Config`] if the text is not valid TOML or does not
    /// match the configuration layout.
    pub fn from_toml_str(text: &str) -> Result<Self, SplitError> {
        toml::from_str(text).map_err(|e| SplitError::Config(e.to_string()))
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SplitError> {
        let text = fs::read_to_string(path)
            .map_err(|e| SplitError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        config.warn_on_suspicious_values();
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Config`] if the file exists but cannot be read or
    /// parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, SplitError> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(SplitError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, SplitError> {
        toml::to_string(self).map_err(|e| SplitError::Config(e.to_string()))
    }

    /// Write the default configuration to `path`.
    ///
    /// An existing file is only replaced when `force` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Config`] if the file exists and `force` is not set,
    /// or [`SplitError::Io`] if writing fails.
    pub fn write_default(path: &Path, force: bool) -> Result<(), SplitError> {
        if path.exists() && !force {
            return Err(SplitError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, Self::default().to_toml_string()?)?;
        Ok(())
    }

    /// The keyword vocabularies as a core [`KeywordTable`].
    pub fn keyword_table(&self) -> KeywordTable {
        KeywordTable {
            value_keywords: self.app.value_keywords.clone(),
            recipient_keywords: self.app.recipient_keywords.clone(),
            bank_acronyms: self.app.bank_acronyms.clone(),
        }
    }

    /// The configured file name template.
    pub fn name_template(&self) -> NameTemplate {
        NameTemplate::new(self.folder.output_filename.clone())
    }

    fn warn_on_suspicious_values(&self) {
        if self.name_template().placeholders().is_empty() {
            log::warn!(
                "output_filename '{}' has no placeholders; every page will get the same base name",
                self.folder.output_filename
            );
        }
        if self.app.value_keywords.iter().all(|w| w.trim().is_empty()) {
            log::warn!("value_keywords is empty; no monetary value will be extracted");
        }
    }
}
