//! PDF text-layer module.
//!
//! Only the embedded text layer is read. Scanned pages carry no text and
//! are reported as [`PdfError::NoTextLayer`]; they must go through OCR
//! before they reach the parser.

mod extractor;

pub use extractor::{read_text, PdfExtractor, PdfText};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}
