//! WASM bindings for purchase-order extraction.
//!
//! Text comes from OCR or PDF extraction done on the JavaScript side; this
//! crate only turns it into structured purchase-order data.

use wasm_bindgen::prelude::*;

use pox_core::models::config::ExtractionConfig;
use pox_core::{
    parse_purchase_order, ExtractionOutcome, PurchaseOrder, PurchaseOrderParser, StrategyKind,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a purchase order from text.
///
/// Never fails on unreadable text: missing fields are empty strings and
/// `items` is empty when no table row is recognized.
#[wasm_bindgen]
pub fn extract_purchase_order(text: &str) -> Result<JsValue, JsValue> {
    to_js(&parse_purchase_order(text))
}

/// Extract a purchase order and flatten it into rows for a worksheet.
///
/// A blank `sheet_name` selects the default worksheet.
#[wasm_bindgen]
pub fn sheet_payload(text: &str, sheet_name: &str) -> Result<JsValue, JsValue> {
    to_js(&parse_purchase_order(text).to_sheet_payload(sheet_name))
}

/// Collapse whitespace runs to single spaces and trim.
#[wasm_bindgen]
pub fn collapse_whitespace(text: &str) -> String {
    pox_core::order::rules::collapse_whitespace(text)
}

/// Purchase-order extractor class for browser use.
#[wasm_bindgen]
pub struct PurchaseOrderExtractor {
    config: ExtractionConfig,
    parser: PurchaseOrderParser,
}

#[wasm_bindgen]
impl PurchaseOrderExtractor {
    /// Create a new extractor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            parser: PurchaseOrderParser::new(),
        }
    }

    /// Set the largest accepted item quantity.
    #[wasm_bindgen]
    pub fn set_max_quantity(&mut self, max: u32) -> Result<(), JsValue> {
        self.config.max_quantity = max;
        self.parser = PurchaseOrderParser::from_config(&self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Extract a purchase order from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract(text))
    }

    /// Get extraction result with metadata.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);

        #[derive(serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExtractResult {
            order: PurchaseOrder,
            outcome: ExtractionOutcome,
            strategy: Option<StrategyKind>,
            table_bounded: bool,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        let output = ExtractResult {
            outcome: result.order.outcome(),
            order: result.order,
            strategy: result.strategy,
            table_bounded: result.table_bounded,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        };

        to_js(&output)
    }
}

impl Default for PurchaseOrderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pox_core::SheetPayload;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TABLE: &str = "PO Number: PO-2024-0117\n\
        No   Item Code   Description   Qty   Price   Disc   Amount\n\
        1   ABC-001   Steel Bolt M6   10   5.000   0   50.000\n\
        2   ABC-002   Washer 6mm   20   1.000   0   20.000\n\
        Requested By: Budi";

    #[wasm_bindgen_test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[wasm_bindgen_test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Steel \n Bolt\tM6 "), "Steel Bolt M6");
    }

    #[wasm_bindgen_test]
    fn test_extract_purchase_order() {
        let value = extract_purchase_order(TABLE).unwrap();
        let order: PurchaseOrder = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(order.po_number, "PO-2024-0117");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[1].description, "Washer 6mm");
    }

    #[wasm_bindgen_test]
    fn test_sheet_payload_default_name() {
        let value = sheet_payload(TABLE, "").unwrap();
        let payload: SheetPayload = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(payload.sheet_name, "Dataset Purchase Order");
        assert_eq!(payload.rows.len(), 2);
    }

    #[wasm_bindgen_test]
    fn test_extractor_max_quantity() {
        let mut extractor = PurchaseOrderExtractor::new();
        extractor.set_max_quantity(15).unwrap();

        let value = extractor.extract(TABLE).unwrap();
        let order: PurchaseOrder = serde_wasm_bindgen::from_value(value).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, "10");
    }
}
