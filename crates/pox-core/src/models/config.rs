//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default worksheet that flattened rows are addressed to.
pub const DEFAULT_SHEET_NAME: &str = "Dataset Purchase Order";

/// Main configuration for pox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoxConfig {
    /// Purchase-order extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Spreadsheet row export configuration.
    pub sheet: SheetConfig,
}

/// Extraction engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Largest accepted row ordinal.
    pub max_ordinal: u32,

    /// Largest accepted item quantity.
    pub max_quantity: u32,

    /// Supplier anchors, tried in order.
    pub supplier_anchors: Vec<SupplierAnchor>,

    /// Phrases that close the line-item table (e.g. "Requested By").
    pub table_end_markers: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_ordinal: 100,
            max_quantity: 9999,
            supplier_anchors: vec![
                SupplierAnchor::new("To", SupplierTerminator::CapitalizedRun),
                SupplierAnchor::new("Kepada", SupplierTerminator::CapitalizedRun),
                SupplierAnchor::new("Supplier", SupplierTerminator::EndOfLine),
                SupplierAnchor::new("Vendor", SupplierTerminator::EndOfLine),
            ],
            table_end_markers: vec!["Requested By".to_string()],
        }
    }
}

/// A label that introduces the supplier name, and where the name stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierAnchor {
    /// Label text before the colon, matched case-insensitively.
    pub anchor: String,

    /// How the supplier name is terminated.
    pub terminator: SupplierTerminator,
}

impl SupplierAnchor {
    pub fn new(anchor: impl Into<String>, terminator: SupplierTerminator) -> Self {
        Self {
            anchor: anchor.into(),
            terminator,
        }
    }
}

/// Termination rule for the supplier name following an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupplierTerminator {
    /// Run of capitalized words; stops at a digit, "item"/"qty", a
    /// lowercase word, or the end of the line.
    CapitalizedRun,
    /// Everything up to the end of the line.
    EndOfLine,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text-layer length to treat a PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 20 }
    }
}

/// Spreadsheet export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Target worksheet name.
    pub sheet_name: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl PoxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
