//! File name synthesis from a template and extracted fields.
//!
//! A template such as `"{VALUE} - {RECIPIENT} - {BANK}"` is filled with the
//! fields of one page. Absent fields become empty strings, and the result is
//! normalized so the separators around an empty slot do not pile up.

use std::fmt;

use crate::error::CoreError;
use crate::extract::ExtractedFields;

/// Characters that cannot appear in a file name on common filesystems.
const ILLEGAL_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A placeholder recognized in a [`NameTemplate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `{VALUE}`: the first monetary value.
    Value,
    /// `{RECIPIENT}`: the recipient name.
    Recipient,
    /// `{BANK}`: the bank acronym.
    Bank,
}

impl Placeholder {
    /// Parse the text between the braces, ignoring case.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("VALUE") {
            Some(Placeholder::Value)
        } else if token.eq_ignore_ascii_case("RECIPIENT") {
            Some(Placeholder::Recipient)
        } else if token.eq_ignore_ascii_case("BANK") {
            Some(Placeholder::Bank)
        } else {
            None
        }
    }

    /// The canonical token, braces included.
    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::Value => "{VALUE}",
            Placeholder::Recipient => "{RECIPIENT}",
            Placeholder::Bank => "{BANK}",
        }
    }

    fn resolve<'f>(&self, fields: &'f ExtractedFields) -> Option<&'f str> {
        match self {
            Placeholder::Value => fields.value.as_deref(),
            Placeholder::Recipient => fields.recipient.as_deref(),
            Placeholder::Bank => fields.bank.as_deref(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A file name template with `{VALUE}`, `{RECIPIENT}` and `{BANK}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl NameTemplate {
    /// Parse a template. Unrecognized `{...}` tokens are kept as literal text.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = parse_segments(&source);
        Self { source, segments }
    }

    /// The template as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Recognized placeholders, in template order.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.segments
            .iter()
            .filter_map(|seg| match seg {
                Segment::Placeholder(p) => Some(*p),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Fill the template with `fields` without normalizing the result.
    pub fn substitute(&self, fields: &ExtractedFields) -> String {
        let mut out = String::with_capacity(self.source.len());
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => out.push_str(p.resolve(fields).unwrap_or("")),
            }
        }
        out
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segments(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let token = &after[..close];
                match Placeholder::parse(token) {
                    Some(p) => {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        segments.push(Segment::Placeholder(p));
                    }
                    None => {
                        literal.push('{');
                        literal.push_str(token);
                        literal.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                literal.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Turns extracted fields into canonical base names.
#[derive(Debug, Clone)]
pub struct NameSynthesizer {
    template: NameTemplate,
    require_value: bool,
}

impl NameSynthesizer {
    /// Create a synthesizer that requires a monetary value on every page.
    pub fn new(template: NameTemplate) -> Self {
        Self {
            template,
            require_value: true,
        }
    }

    /// Whether a page without a monetary value fails naming (default: `true`).
    pub fn with_require_value(mut self, require_value: bool) -> Self {
        self.require_value = require_value;
        self
    }

    /// The template in use.
    pub fn template(&self) -> &NameTemplate {
        &self.template
    }

    /// Build the canonical base name for one page.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoIdentifyingData`] if a value is required but
    /// absent, or if the normalized name is empty.
    pub fn synthesize(&self, fields: &ExtractedFields) -> Result<String, CoreError> {
        if self.require_value && fields.value.is_none() {
            return Err(self.no_data());
        }
        let name = normalize(&self.template.substitute(fields));
        if name.is_empty() {
            return Err(self.no_data());
        }
        Ok(name)
    }

    fn no_data(&self) -> CoreError {
        CoreError::NoIdentifyingData {
            template: self.template.as_str().to_string(),
        }
    }
}

/// Synthesize a base name, requiring a monetary value.
///
/// # Errors
///
/// See [`NameSynthesizer::synthesize`].
pub fn synthesize(template: &NameTemplate, fields: &ExtractedFields) -> Result<String, CoreError> {
    NameSynthesizer::new(template.clone()).synthesize(fields)
}

/// Normalize substituted template text into a file-name-safe stem.
///
/// 1. Drop characters illegal in file names and control characters.
/// 2. Collapse runs of an identical non-alphanumeric character to one.
/// 3. Strip non-alphanumeric characters from both ends.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if c.is_control() || ILLEGAL_FILENAME_CHARS.contains(&c) {
            continue;
        }
        if !c.is_alphanumeric() && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }

    out.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
}
