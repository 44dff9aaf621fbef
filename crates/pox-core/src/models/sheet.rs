//! Flattening purchase orders into spreadsheet rows.
//!
//! A spreadsheet backend stores one row per line item with the header
//! fields repeated on every row. Column order:
//! PO number, PO date, supplier, item code, item description, quantity,
//! PO description.

use serde::{Deserialize, Serialize};

use super::config::DEFAULT_SHEET_NAME;
use super::purchase_order::PurchaseOrder;

/// Column titles matching [`SheetRow`] order.
pub const SHEET_COLUMNS: [&str; 7] = [
    "po_number",
    "po_date",
    "supplier",
    "item_code",
    "item_description",
    "quantity",
    "po_description",
];

/// One flattened line item.
pub type SheetRow = [String; 7];

/// Rows addressed to a named worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPayload {
    /// Target worksheet.
    pub sheet_name: String,
    /// Flattened rows.
    pub rows: Vec<SheetRow>,
}

impl PurchaseOrder {
    /// Flatten line items into sheet rows. A partial order has no rows.
    pub fn to_sheet_rows(&self) -> Vec<SheetRow> {
        self.items
            .iter()
            .map(|item| {
                [
                    self.po_number.clone(),
                    self.po_date.clone(),
                    self.supplier.clone(),
                    item.item_code.clone(),
                    item.description.clone(),
                    item.quantity.clone(),
                    self.description.clone(),
                ]
            })
            .collect()
    }

    /// Build a payload for the given worksheet.
    pub fn to_sheet_payload(&self, sheet_name: &str) -> SheetPayload {
        let sheet_name = if sheet_name.trim().is_empty() {
            DEFAULT_SHEET_NAME
        } else {
            sheet_name.trim()
        };

        SheetPayload {
            sheet_name: sheet_name.to_string(),
            rows: self.to_sheet_rows(),
        }
    }
}
