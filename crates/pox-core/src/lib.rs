//! Core library for purchase-order extraction.
//!
//! This crate provides:
//! - Purchase-order data models (header fields plus line items)
//! - A cascading, heuristic line-item parser for OCR/PDF text
//! - Header field extraction (PO number, date, supplier, description)
//! - PDF text-layer extraction (behind the `native` feature)
//!
//! The extraction engine never fails: text that matches nothing yields a
//! [`PurchaseOrder`] with empty fields and no items.

pub mod error;
pub mod models;
pub mod order;
#[cfg(feature = "native")]
pub mod pdf;

pub use error::{PdfError, PoxError, Result, RowRejection};
pub use models::config::{ExtractionConfig, PoxConfig, SupplierAnchor, SupplierTerminator};
pub use models::purchase_order::{ExtractionOutcome, LineItem, PurchaseOrder};
pub use models::sheet::{SheetPayload, SheetRow};
pub use order::{
    parse_purchase_order, CascadeOutcome, CascadingLineItemParser, ExtractionResult,
    HeaderFieldExtractor, HeaderFields, LineItemStrategy, LineItemValidator, PurchaseOrderParser,
    StrategyKind, TableRegionLocator,
};
#[cfg(feature = "native")]
pub use pdf::{read_text, PdfExtractor, PdfProcessor, PdfText};
