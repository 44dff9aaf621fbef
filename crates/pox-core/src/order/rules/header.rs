//! Header field extraction: PO number, PO date, supplier, description.
//!
//! Each field has an ordered list of candidate patterns; the first one that
//! matches wins and an unmatched field is an empty string.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{PoxError, Result};
use crate::models::config::{ExtractionConfig, SupplierAnchor, SupplierTerminator};

use super::normalize::{collapse_whitespace, normalize_word};
use super::patterns::*;

/// Words that end a capitalized supplier run.
const SUPPLIER_STOP_WORDS: [&str; 4] = ["item", "items", "qty", "quantity"];

lazy_static! {
    static ref DEFAULT_ANCHORS: Vec<CompiledAnchor> =
        compile_anchors(&ExtractionConfig::default().supplier_anchors).unwrap();
}

/// Header fields of a purchase order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderFields {
    pub po_number: String,
    pub po_date: String,
    pub supplier: String,
    pub description: String,
}

#[derive(Debug, Clone)]
struct CompiledAnchor {
    label: String,
    pattern: Regex,
    terminator: SupplierTerminator,
}

/// Extracts the four header fields independently of each other.
#[derive(Debug, Clone)]
pub struct HeaderFieldExtractor {
    supplier_anchors: Vec<CompiledAnchor>,
}

impl HeaderFieldExtractor {
    /// Create an extractor with the default supplier anchors.
    pub fn new() -> Self {
        Self {
            supplier_anchors: DEFAULT_ANCHORS.clone(),
        }
    }

    /// Create an extractor with a custom ordered list of supplier anchors.
    pub fn with_anchors(anchors: &[SupplierAnchor]) -> Result<Self> {
        Ok(Self {
            supplier_anchors: compile_anchors(anchors)?,
        })
    }

    /// Extract all header fields.
    pub fn extract(&self, text: &str) -> HeaderFields {
        let header = HeaderFields {
            po_number: self.extract_po_number(text).unwrap_or_default(),
            po_date: self.extract_po_date(text).unwrap_or_default(),
            supplier: self.extract_supplier(text).unwrap_or_default(),
            description: self.extract_description(text).unwrap_or_default(),
        };

        debug!(
            "Header fields: po_number={:?}, po_date={:?}, supplier={:?}",
            header.po_number, header.po_date, header.supplier
        );

        header
    }

    /// PO number: labeled token first, then a bare `PO`-prefixed token.
    pub fn extract_po_number(&self, text: &str) -> Option<String> {
        if let Some(number) = first_capture(&[&PO_NUMBER_LABELED], text) {
            return Some(number);
        }

        // Bare token must carry a digit to tell "PO2024-001" from words like "POLICY".
        PO_NUMBER_BARE
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|token| token.chars().any(|c| c.is_ascii_digit()))
            .map(str::to_string)
    }

    /// PO date: "PO Date:", then "Date:"/"Tanggal:", then any date-shaped token.
    pub fn extract_po_date(&self, text: &str) -> Option<String> {
        first_capture(
            &[
                &PO_DATE_LABELED,
                &PO_DATE_LABELED_LONG,
                &DATE_LABELED,
                &DATE_LABELED_LONG,
                &DATE_BARE,
            ],
            text,
        )
        .map(|date| collapse_whitespace(&date))
    }

    /// Supplier: the first configured anchor that yields a non-empty name.
    pub fn extract_supplier(&self, text: &str) -> Option<String> {
        for anchor in &self.supplier_anchors {
            for m in anchor.pattern.find_iter(text) {
                let rest = &text[m.end()..];
                let line = rest.lines().next().unwrap_or_default();

                let name = match anchor.terminator {
                    SupplierTerminator::CapitalizedRun => capitalized_run(line),
                    SupplierTerminator::EndOfLine => collapse_whitespace(line),
                };

                if !name.is_empty() {
                    trace!("Supplier matched anchor {:?}", anchor.label);
                    return Some(name);
                }
            }
        }

        None
    }

    /// Description: text after "Description -" or "Description:" to end of line.
    pub fn extract_description(&self, text: &str) -> Option<String> {
        first_capture(&[&DESCRIPTION], text)
    }
}

impl Default for HeaderFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&ExtractionConfig> for HeaderFieldExtractor {
    type Error = PoxError;

    fn try_from(config: &ExtractionConfig) -> Result<Self> {
        Self::with_anchors(&config.supplier_anchors)
    }
}

/// First non-empty capture group 1 across the candidate patterns, in order.
fn first_capture(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Leading run of capitalized words. Stops at a token starting with a digit,
/// an item/quantity keyword, or any token not starting with an uppercase letter.
fn capitalized_run(line: &str) -> String {
    let mut words: Vec<&str> = Vec::new();

    for token in line.split_whitespace() {
        let first = token.chars().next().unwrap_or(' ');
        if first.is_ascii_digit() || SUPPLIER_STOP_WORDS.contains(&normalize_word(token).as_str()) {
            break;
        }
        if !(first.is_uppercase() || token == "&") {
            break;
        }
        words.push(token);
    }

    while words.last() == Some(&"&") {
        words.pop();
    }

    words.join(" ")
}

fn compile_anchors(anchors: &[SupplierAnchor]) -> Result<Vec<CompiledAnchor>> {
    anchors
        .iter()
        .map(|anchor| {
            let label = anchor.anchor.trim();
            if label.is_empty() {
                return Err(PoxError::Config("supplier anchor must not be empty".to_string()));
            }

            let words: Vec<String> = label.split_whitespace().map(regex::escape).collect();
            let pattern = Regex::new(&format!(r"(?i)\b{}[ \t]*:[ \t]*", words.join(r"\s+")))
                .map_err(|e| PoxError::Config(format!("supplier anchor {:?}: {}", label, e)))?;

            Ok(CompiledAnchor {
                label: label.to_string(),
                pattern,
                terminator: anchor.terminator,
            })
        })
        .collect()
}
