//! Purchase-order data models.

use serde::{Deserialize, Serialize};

/// A purchase order recovered from document text.
///
/// Every field is the raw text matched in the document. Missing header
/// fields are empty strings and a document without a readable table has no
/// items; neither is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// Purchase order number.
    pub po_number: String,

    /// Purchase order date as printed (not date-parsed).
    pub po_date: String,

    /// Supplier name.
    pub supplier: String,

    /// Free-text description of the order.
    pub description: String,

    /// Line items in document order.
    pub items: Vec<LineItem>,
}

/// A single validated row of the line-item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Row ordinal as printed on the document.
    pub no: String,

    /// Item code.
    pub item_code: String,

    /// Item description, whitespace collapsed.
    pub description: String,

    /// Ordered quantity (decimal digits).
    pub quantity: String,

    /// Unit price column, when the parsing strategy captured it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<String>,

    /// Discount column, when the parsing strategy captured it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,

    /// Line amount column, when the parsing strategy captured it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// How much of a purchase order could be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// At least one line item was extracted.
    Complete,
    /// The document was parsed but no line item survived validation.
    Partial,
}

impl std::fmt::Display for ExtractionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionOutcome::Complete => write!(f, "complete"),
            ExtractionOutcome::Partial => write!(f, "partial"),
        }
    }
}

impl PurchaseOrder {
    /// Classify the record by its item count.
    pub fn outcome(&self) -> ExtractionOutcome {
        if self.items.is_empty() {
            ExtractionOutcome::Partial
        } else {
            ExtractionOutcome::Complete
        }
    }

    /// Names of header fields that were not found.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.po_number.is_empty() {
            missing.push("poNumber");
        }
        if self.po_date.is_empty() {
            missing.push("poDate");
        }
        if self.supplier.is_empty() {
            missing.push("supplier");
        }
        if self.description.is_empty() {
            missing.push("description");
        }
        missing
    }

    /// Sum of all item quantities.
    ///
    /// Quantities are validated digit strings, so parsing only fails on
    /// values that overflow, which are skipped.
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .filter_map(|item| item.quantity.parse::<u64>().ok())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(no: &str, qty: &str) -> LineItem {
        LineItem {
            no: no.to_string(),
            item_code: format!("ABC-00{}", no),
            description: "Steel Bolt M6".to_string(),
            quantity: qty.to_string(),
            unit_price: None,
            discount: None,
            amount: None,
        }
    }

    #[test]
    fn test_outcome_depends_on_items() {
        let mut order = PurchaseOrder {
            po_number: "PO-2024-001".to_string(),
            ..Default::default()
        };
        assert_eq!(order.outcome(), ExtractionOutcome::Partial);

        order.items.push(item("1", "10"));
        assert_eq!(order.outcome(), ExtractionOutcome::Complete);
    }

    #[test]
    fn test_missing_fields() {
        let order = PurchaseOrder {
            po_number: "PO-2024-001".to_string(),
            supplier: "PT Maju Jaya".to_string(),
            ..Default::default()
        };
        assert_eq!(order.missing_fields(), vec!["poDate", "description"]);
    }

    #[test]
    fn test_total_quantity() {
        let order = PurchaseOrder {
            items: vec![item("1", "10"), item("2", "20")],
            ..Default::default()
        };
        assert_eq!(order.total_quantity(), 30);
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_absent_prices() {
        let order = PurchaseOrder {
            po_number: "PO-1".to_string(),
            items: vec![item("1", "10")],
            ..Default::default()
        };
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["poNumber"], "PO-1");
        assert_eq!(json["items"][0]["itemCode"], "ABC-001");
        assert!(json["items"][0].get("unitPrice").is_none());
    }
}
