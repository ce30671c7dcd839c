//! Field extraction from linear page text.
//!
//! [`extract`] pulls the monetary value, the recipient name, and the bank
//! acronym out of one page's text using a [`CompiledRegistry`]. It is a pure
//! function: unmatched fields are simply absent.

use crate::registry::CompiledRegistry;

/// Fields extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedFields {
    /// First monetary value on the page, as the raw literal (e.g. `"1.234,56"`).
    pub value: Option<String>,
    /// Recipient name, trimmed.
    pub recipient: Option<String>,
    /// Acronym of the first bank-table entry found on the page.
    pub bank: Option<String>,
    /// Every monetary value on the page, in order of appearance.
    pub values: Vec<String>,
}

impl ExtractedFields {
    /// Returns `true` when no field was found.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.recipient.is_none() && self.bank.is_none()
    }
}

/// Extract all fields from `text`.
pub fn extract(text: &str, registry: &CompiledRegistry) -> ExtractedFields {
    let values = extract_values(text, registry);
    ExtractedFields {
        value: values.first().cloned(),
        recipient: extract_recipient(text, registry),
        bank: extract_bank(text, registry).map(str::to_string),
        values,
    }
}

/// All indicator + value pairs in `text`, returning the numeric literals in
/// order of appearance.
pub fn extract_values(text: &str, registry: &CompiledRegistry) -> Vec<String> {
    let Some(re) = &registry.value_pattern else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The first recipient name in `text`, trimmed. Blank captures count as absent.
pub fn extract_recipient(text: &str, registry: &CompiledRegistry) -> Option<String> {
    let re = registry.recipient_pattern.as_ref()?;
    let name = re.captures(text)?.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// The acronym of the first bank-table entry whose name occurs in `text`.
///
/// Table order decides, not position in the text.
pub fn extract_bank<'r>(text: &str, registry: &'r CompiledRegistry) -> Option<&'r str> {
    if registry.banks.is_empty() {
        return None;
    }
    let upper = text.to_uppercase();
    registry
        .banks
        .iter()
        .find(|(name, _)| upper.contains(name.as_str()))
        .map(|(_, acronym)| acronym.as_str())
}
