//! Purchase-order field extraction module.

mod parser;
pub mod rules;
pub mod strategies;

pub use parser::{assemble_purchase_order, ExtractionResult, PurchaseOrderParser};
pub use rules::{HeaderFieldExtractor, HeaderFields, LineItemValidator, TableRegionLocator};
pub use strategies::{CascadeOutcome, CascadingLineItemParser, LineItemStrategy, StrategyKind};

use crate::models::purchase_order::PurchaseOrder;

/// Extract a purchase order from text with the default parser.
pub fn parse_purchase_order(text: &str) -> PurchaseOrder {
    PurchaseOrderParser::new().extract(text)
}
