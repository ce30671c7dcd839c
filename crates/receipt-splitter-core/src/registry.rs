//! Keyword vocabularies and their compilation into extraction patterns.
//!
//! A [`KeywordTable`] is plain data, typically loaded from configuration.
//! [`compile`] turns it into a [`CompiledRegistry`] once per run; the
//! extractor only ever sees the compiled form.

use regex::Regex;

use crate::error::CoreError;

/// Currency marker and numeric literal that follow a value keyword.
///
/// `.` and `,` are accepted both as grouping and as decimal separators; the
/// literal is captured as-is.
const VALUE_TAIL: &str = r":?\s*(?:R\$|\$)?\s*([0-9]+(?:[.,][0-9]{3})*(?:[.,][0-9]+)?)";

/// Name run that follows a recipient keyword, ended by a hyphen, a newline,
/// or the end of the text.
const RECIPIENT_TAIL: &str = r":?\s*([\p{L}\s]+?)\s*(?:-|\n|$)";

/// A bank's full name and the acronym used in file names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BankAcronym {
    /// Full bank name as it appears on receipts. Matched case-insensitively.
    pub name: String,
    /// Short code substituted for `{BANK}`.
    pub acronym: String,
}

impl BankAcronym {
    /// Create a new table entry.
    pub fn new(name: impl Into<String>, acronym: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            acronym: acronym.into(),
        }
    }
}

/// The keyword vocabularies used to build extraction patterns.
///
/// Order is significant for `bank_acronyms`: the first entry whose name occurs
/// in a page wins.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeywordTable {
    /// Words that precede a monetary value (e.g. "Valor", "Valor principal").
    pub value_keywords: Vec<String>,
    /// Phrases that precede the recipient's name (e.g. "Favorecido").
    pub recipient_keywords: Vec<String>,
    /// Full bank name to acronym, scanned in order.
    pub bank_acronyms: Vec<BankAcronym>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let strings = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect();
        Self {
            value_keywords: strings(&[
                "Valor principal",
                "Valor nominal",
                "Valor total",
                "Valor do pagamento",
                "Valor",
            ]),
            recipient_keywords: strings(&["Nome do Destinatário", "Favorecido"]),
            bank_acronyms: vec![
                BankAcronym::new("Banco do Brasil", "BB"),
                BankAcronym::new("Caixa Econômica Federal", "CEF"),
                BankAcronym::new("Caixa Economica Federal", "CEF"),
                BankAcronym::new("Itaú Unibanco", "ITAU"),
                BankAcronym::new("Itau Unibanco", "ITAU"),
                BankAcronym::new("Bradesco", "BRADESCO"),
                BankAcronym::new("Santander", "SANTANDER"),
                BankAcronym::new("Nu Pagamentos", "NUBANK"),
                BankAcronym::new("Nubank", "NUBANK"),
                BankAcronym::new("Banco Inter", "INTER"),
                BankAcronym::new("Sicoob", "SICOOB"),
                BankAcronym::new("Sicredi", "SICREDI"),
                BankAcronym::new("Banco Original", "ORIGINAL"),
                BankAcronym::new("C6 Bank", "C6"),
                BankAcronym::new("PagSeguro", "PAGBANK"),
                BankAcronym::new("Mercado Pago", "MP"),
            ],
        }
    }
}

/// A [`KeywordTable`] compiled into ready-to-run patterns.
///
/// A `None` pattern means the vocabulary was empty and nothing can match.
#[derive(Debug, Clone)]
pub struct CompiledRegistry {
    pub(crate) value_pattern: Option<Regex>,
    pub(crate) recipient_pattern: Option<Regex>,
    /// Upper-cased full name paired with its acronym, in table order.
    pub(crate) banks: Vec<(String, String)>,
}

/// Build the alternation for a keyword list, or `None` if it is empty.
///
/// Keywords are escaped and blank entries dropped. Longer keywords come first
/// so "Valor principal" is preferred over its prefix "Valor".
pub fn keyword_alternation(keywords: &[String]) -> Option<String> {
    let mut words: Vec<&str> = keywords
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }
    // Stable sort keeps configured order among equal lengths.
    words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Some(format!("(?:{})", escaped.join("|")))
}

/// Pattern source for the monetary value, or `None` for an empty vocabulary.
pub fn value_pattern_source(keywords: &[String]) -> Option<String> {
    keyword_alternation(keywords).map(|alt| format!("(?i){alt}{VALUE_TAIL}"))
}

/// Pattern source for the recipient name, or `None` for an empty vocabulary.
pub fn recipient_pattern_source(keywords: &[String]) -> Option<String> {
    keyword_alternation(keywords).map(|alt| format!("(?i){alt}{RECIPIENT_TAIL}"))
}

/// Compile a keyword table into a [`CompiledRegistry`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidPattern`] if the generated pattern is rejected
/// by the regex engine (e.g. it exceeds the compiled size limit).
pub fn compile(table: &KeywordTable) -> Result<CompiledRegistry, CoreError> {
    let value_pattern = value_pattern_source(&table.value_keywords)
        .map(|src| Regex::new(&src))
        .transpose()?;
    let recipient_pattern = recipient_pattern_source(&table.recipient_keywords)
        .map(|src| Regex::new(&src))
        .transpose()?;
    let banks = table
        .bank_acronyms
        .iter()
        .filter(|entry| !entry.name.trim().is_empty())
        .map(|entry| (entry.name.trim().to_uppercase(), entry.acronym.clone()))
        .collect();

    Ok(CompiledRegistry {
        value_pattern,
        recipient_pattern,
        banks,
    })
}

impl CompiledRegistry {
    /// Number of bank entries that survived compilation.
    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }
}
