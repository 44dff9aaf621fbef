//! Locating the line-item table inside the document text.

use regex::Regex;
use tracing::debug;

use crate::error::{PoxError, Result};
use crate::models::config::ExtractionConfig;

use super::patterns::{TABLE_END, TABLE_START};

/// The slice of document text believed to hold the line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion<'a> {
    /// Region text.
    pub text: &'a str,
    /// Whether both table markers were found. When `false`, `text` is the
    /// whole document.
    pub bounded: bool,
}

/// Finds the table between its column-header line and a closing phrase.
#[derive(Debug, Clone)]
pub struct TableRegionLocator {
    end_markers: Vec<Regex>,
}

impl TableRegionLocator {
    /// Create a locator that ends the table at "Requested By".
    pub fn new() -> Self {
        Self {
            end_markers: vec![TABLE_END.clone()],
        }
    }

    /// Create a locator with custom closing phrases.
    pub fn with_end_markers<S: AsRef<str>>(markers: &[S]) -> Result<Self> {
        let end_markers = markers
            .iter()
            .map(|marker| {
                let marker = marker.as_ref().trim();
                if marker.is_empty() {
                    return Err(PoxError::Config("table end marker must not be empty".to_string()));
                }
                phrase_pattern(marker)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { end_markers })
    }

    /// Return the text strictly between the table header and the closing
    /// phrase, or the whole text when either marker is missing.
    pub fn locate<'a>(&self, text: &'a str) -> TableRegion<'a> {
        let Some(start) = TABLE_START.find(text) else {
            debug!("Table header not found, using full text");
            return TableRegion { text, bounded: false };
        };

        let after_header = &text[start.end()..];
        let end = self
            .end_markers
            .iter()
            .filter_map(|marker| marker.find(after_header))
            .map(|m| m.start())
            .min();

        match end {
            Some(end) => {
                debug!("Table region spans {} characters", end);
                TableRegion {
                    text: &after_header[..end],
                    bounded: true,
                }
            }
            None => {
                debug!("Table end marker not found, using full text");
                TableRegion { text, bounded: false }
            }
        }
    }
}

impl Default for TableRegionLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&ExtractionConfig> for TableRegionLocator {
    type Error = PoxError;

    fn try_from(config: &ExtractionConfig) -> Result<Self> {
        Self::with_end_markers(&config.table_end_markers)
    }
}

/// Case-insensitive pattern for a phrase with any whitespace between words.
fn phrase_pattern(phrase: &str) -> Result<Regex> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    let boundary = if phrase.starts_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };

    Regex::new(&format!("(?i){}{}", boundary, words.join(r"\s+")))
        .map_err(|e| PoxError::Config(format!("table end marker {:?}: {}", phrase, e)))
}
