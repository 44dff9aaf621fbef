//! Purchase-order parser: header fields, table region, line-item cascade.

use std::time::Instant;

use lazy_static::lazy_static;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::purchase_order::{LineItem, PurchaseOrder};

use super::rules::{normalize_newlines, HeaderFieldExtractor, HeaderFields, LineItemValidator, TableRegionLocator};
use super::strategies::{CascadingLineItemParser, StrategyKind};

lazy_static! {
    static ref DEFAULT_PARSER: PurchaseOrderParser = PurchaseOrderParser {
        header: HeaderFieldExtractor::new(),
        locator: TableRegionLocator::new(),
        cascade: CascadingLineItemParser::default(),
    };
}

/// Result of purchase-order extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted purchase order.
    pub order: PurchaseOrder,
    /// Strategy that produced the items, if any did.
    pub strategy: Option<StrategyKind>,
    /// Whether the table header and closing phrase were both found.
    pub table_bounded: bool,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based purchase-order parser.
///
/// Parsing is a pure function of the input text: it never fails and the
/// same text always yields the same order.
#[derive(Debug, Clone)]
pub struct PurchaseOrderParser {
    header: HeaderFieldExtractor,
    locator: TableRegionLocator,
    cascade: CascadingLineItemParser,
}

impl PurchaseOrderParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        DEFAULT_PARSER.clone()
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let validator = LineItemValidator::new()
            .with_max_ordinal(config.max_ordinal)
            .with_max_quantity(config.max_quantity);

        Ok(Self {
            header: HeaderFieldExtractor::try_from(config)?,
            locator: TableRegionLocator::try_from(config)?,
            cascade: CascadingLineItemParser::new(validator),
        })
    }

    /// Parse a purchase order, reporting strategy, warnings and timing.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let text = normalize_newlines(text);
        info!("Parsing purchase order from {} characters of text", text.len());

        let header = self.header.extract(&text);

        let region = self.locator.locate(&text);
        if !region.bounded {
            warnings.push("Line-item table markers not found, scanned the whole text".to_string());
        }

        let outcome = self.cascade.parse_with_strategy(region.text);
        if outcome.items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        let order = assemble_purchase_order(header, outcome.items);
        warnings.extend(
            order
                .missing_fields()
                .into_iter()
                .map(|field| format!("Could not extract {}", field)),
        );

        debug!(
            "Extracted purchase order {:?} with {} items",
            order.po_number,
            order.items.len()
        );

        ExtractionResult {
            order,
            strategy: outcome.strategy,
            table_bounded: region.bounded,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Parse a purchase order.
    pub fn extract(&self, text: &str) -> PurchaseOrder {
        self.parse(text).order
    }
}

impl Default for PurchaseOrderParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Combine header fields and items into a purchase order.
pub fn assemble_purchase_order(header: HeaderFields, items: Vec<LineItem>) -> PurchaseOrder {
    PurchaseOrder {
        po_number: header.po_number,
        po_date: header.po_date,
        supplier: header.supplier,
        description: header.description,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{SupplierAnchor, SupplierTerminator};
    use crate::models::purchase_order::ExtractionOutcome;
    use pretty_assertions::assert_eq;

    const PO_TEXT: &str = "PURCHASE ORDER\n\
        PO Number: PO-2024-0117\n\
        PO Date: 12/03/2024\n\
        To: PT Sumber Makmur Abadi\n\
        Description: Spare parts for line 2\n\
        \n\
        No   Item Code   Description   Qty   Unit Price   Disc   Amount\n\
        1   ABC-001   Steel Bolt M6   10   5.000   0   50.000\n\
        2   ABC-002   Washer 6mm   20   1.000   0   20.000\n\
        Subtotal   70.000\n\
        Requested By: Budi";

    fn item(no: &str, code: &str, description: &str, quantity: &str) -> (String, String, String, String) {
        (
            no.to_string(),
            code.to_string(),
            description.to_string(),
            quantity.to_string(),
        )
    }

    fn columns(order: &PurchaseOrder) -> Vec<(String, String, String, String)> {
        order
            .items
            .iter()
            .map(|i| item(&i.no, &i.item_code, &i.description, &i.quantity))
            .collect()
    }

    #[test]
    fn test_parse_full_document() {
        let result = PurchaseOrderParser::new().parse(PO_TEXT);
        let order = &result.order;

        assert_eq!(order.po_number, "PO-2024-0117");
        assert_eq!(order.po_date, "12/03/2024");
        assert_eq!(order.supplier, "PT Sumber Makmur Abadi");
        assert_eq!(order.description, "Spare parts for line 2");
        assert_eq!(
            columns(order),
            vec![
                item("1", "ABC-001", "Steel Bolt M6", "10"),
                item("2", "ABC-002", "Washer 6mm", "20"),
            ]
        );
        assert_eq!(result.strategy, Some(StrategyKind::RunJoin));
        assert!(result.table_bounded);
        assert!(result.warnings.is_empty());
        assert_eq!(order.outcome(), ExtractionOutcome::Complete);
    }

    #[test]
    fn test_table_region_only() {
        let order = parse_text(
            "1   ABC-001   Steel Bolt M6   10   5.000   0   50.000\n\
             2   ABC-002   Washer 6mm   20   1.000   0   20.000",
        );

        assert_eq!(
            columns(&order),
            vec![
                item("1", "ABC-001", "Steel Bolt M6", "10"),
                item("2", "ABC-002", "Washer 6mm", "20"),
            ]
        );
    }

    #[test]
    fn test_wrapped_description_is_one_item() {
        let order = parse_text(
            "No   Item Code   Description   Qty   Price   Disc   Amount\n\
             1   ABC-001   Steel Bolt M6 Hex Head\n\
             Galvanized Zinc Plated   10   5.000   0   50.000\n\
             Requested By",
        );

        assert_eq!(
            columns(&order),
            vec![item("1", "ABC-001", "Steel Bolt M6 Hex Head Galvanized Zinc Plated", "10")]
        );
    }

    #[test]
    fn test_header_and_footer_only() {
        let result = PurchaseOrderParser::new().parse(
            "PO Number: PO-2024-0117\n\
             PO Date: 12/03/2024\n\
             Subtotal   70.000\n\
             PPN 11%   7.700\n\
             Grand Total   77.700",
        );

        assert!(result.order.items.is_empty());
        assert_eq!(result.order.po_number, "PO-2024-0117");
        assert_eq!(result.order.po_date, "12/03/2024");
        assert_eq!(result.strategy, None);
        assert!(!result.table_bounded);
        assert_eq!(result.order.outcome(), ExtractionOutcome::Partial);
        assert!(result.warnings.contains(&"Could not extract line items".to_string()));
        assert!(result.warnings.contains(&"Could not extract supplier".to_string()));
    }

    #[test]
    fn test_missing_supplier_anchor() {
        let text = PO_TEXT.replace("To: PT Sumber Makmur Abadi\n", "");
        let order = parse_text(&text);

        assert_eq!(order.supplier, "");
        assert_eq!(order.po_number, "PO-2024-0117");
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_rejects_bad_quantities() {
        for quantity in ["0", "ten"] {
            let text = PO_TEXT.replace("Steel Bolt M6   10", &format!("Steel Bolt M6   {}", quantity));
            let order = parse_text(&text);

            assert_eq!(order.items.len(), 1, "quantity {:?}", quantity);
            assert_eq!(order.items[0].no, "2");
        }
    }

    #[test]
    fn test_bad_quantity_on_a_shared_line() {
        let result = PurchaseOrderParser::new().parse(
            "1   ABC-001   Steel Bolt M6   ten   5.000   0   50.000   \
             2   ABC-002   Washer 6mm   20   1.000   0   20.000",
        );

        assert_eq!(result.strategy, Some(StrategyKind::MultiGroup));
        assert_eq!(result.order.items.len(), 1);
        assert_eq!(result.order.items[0].no, "2");
        assert_eq!(result.order.items[0].description, "Washer 6mm");
    }

    #[test]
    fn test_item_code_digits_are_not_a_row() {
        let result = PurchaseOrderParser::new()
            .parse("Item ABC-12   XY-01   Steel Bolt M6   10   5.000   0   50.000");

        assert_eq!(result.strategy, None);
        assert!(result.order.items.is_empty());
    }

    #[test]
    fn test_no_integer_prefixed_rows() {
        let order = parse_text(
            "No   Item Code   Description   Qty\n\
             Bolt   ABC-001   10\n\
             Requested By: Budi",
        );

        assert!(order.items.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let parser = PurchaseOrderParser::new();
        assert_eq!(parser.extract(PO_TEXT), parser.extract(PO_TEXT));
    }

    #[test]
    fn test_crlf_input() {
        let order = parse_text(&PO_TEXT.replace('\n', "\r\n"));

        assert_eq!(order.supplier, "PT Sumber Makmur Abadi");
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            max_quantity: 15,
            supplier_anchors: vec![SupplierAnchor::new("Vendor", SupplierTerminator::EndOfLine)],
            ..Default::default()
        };
        let parser = PurchaseOrderParser::from_config(&config).unwrap();
        let order = parser.extract(&PO_TEXT.replace("To:", "Vendor:"));

        assert_eq!(order.supplier, "PT Sumber Makmur Abadi");
        assert_eq!(columns(&order), vec![item("1", "ABC-001", "Steel Bolt M6", "10")]);
    }

    #[test]
    fn test_from_config_rejects_empty_marker() {
        let config = ExtractionConfig {
            table_end_markers: vec![" ".to_string()],
            ..Default::default()
        };

        assert!(PurchaseOrderParser::from_config(&config).is_err());
    }

    fn parse_text(text: &str) -> PurchaseOrder {
        PurchaseOrderParser::new().extract(text)
    }
}
