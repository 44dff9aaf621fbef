//! Error types for the pox-core library.
//!
//! The extraction engine itself never returns an error. These types cover
//! the surrounding work: loading documents, reading configuration, and
//! the reasons a candidate table row is rejected.

use thiserror::Error;

/// Main error type for the pox library.
#[derive(Error, Debug)]
pub enum PoxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be (de)serialized.
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// The PDF has no usable text layer (scanned pages need OCR first).
    #[error("PDF has no text layer ({0} characters extracted)")]
    NoTextLayer(usize),
}

/// Reason a candidate table row was not turned into a line item.
///
/// Rejections are diagnostics only; strategies log them and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// The row did not split into enough columns.
    #[error("expected at least {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    /// Ordinal is not a bare integer in range.
    #[error("invalid ordinal {0:?}")]
    Ordinal(String),

    /// Item code is too short or holds characters outside `[\w-]`.
    #[error("invalid item code {0:?}")]
    ItemCode(String),

    /// Description length is out of bounds after collapsing whitespace.
    #[error("description length {0} out of bounds")]
    DescriptionLength(usize),

    /// Quantity is not a bare positive integer within the allowed bound.
    #[error("invalid quantity {0:?}")]
    Quantity(String),

    /// A price-like column holds something other than digits and separators.
    #[error("invalid {column} {value:?}")]
    Numeric { column: &'static str, value: String },
}

/// Result type for the pox library.
pub type Result<T> = std::result::Result<T, PoxError>;
