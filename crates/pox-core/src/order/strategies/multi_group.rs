//! Direct multi-group scan over the whole table text.
//!
//! Some extraction front ends do not break table rows into lines reliably.
//! A single seven-column pattern, with wide gaps as column separators, is
//! scanned across the text for non-overlapping matches instead.

use tracing::trace;

use crate::models::purchase_order::LineItem;
use crate::order::rules::patterns::{EMBEDDED_ROW_START, SEVEN_COLUMN_ROW};
use crate::order::rules::{CandidateRow, LineItemValidator};

use super::{LineItemStrategy, StrategyKind};

/// Strategy 2: one seven-column pattern over the whole table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiGroupStrategy;

impl LineItemStrategy for MultiGroupStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MultiGroup
    }

    fn extract(&self, table: &str, validator: &LineItemValidator) -> Vec<LineItem> {
        let mut items = Vec::new();
        let mut start = 0;

        while let Some(caps) = SEVEN_COLUMN_ROW.captures_at(table, start) {
            let (Some(whole), Some(description)) = (caps.get(0), caps.get(3)) else {
                break;
            };

            // A row with a malformed column lets the description run into the
            // next row; resume the scan at that row instead.
            if let Some(next_row) = EMBEDDED_ROW_START.find(description.as_str()) {
                trace!("Match {:?} spans two rows", whole.as_str());
                start = description.start() + next_row.start();
                continue;
            }
            start = whole.end();

            // The validator collapses whitespace inside the description.
            let candidate = CandidateRow::new(&caps[1], &caps[2], &caps[3], &caps[4])
                .with_prices(&caps[5], &caps[6], &caps[7]);

            match validator.validate(&candidate) {
                Ok(item) => items.push(item),
                Err(reason) => trace!("Match {:?} rejected: {}", whole.as_str(), reason),
            }
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(table: &str) -> Vec<LineItem> {
        MultiGroupStrategy.extract(table, &LineItemValidator::new())
    }

    #[test]
    fn test_rows_on_one_line() {
        let items = extract(
            "1   ABC-001   Steel Bolt M6   10   5.000   0   50.000   \
             2   ABC-002   Washer 6mm   20   1.000   0   20.000",
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "Steel Bolt M6");
        assert_eq!(items[1].item_code, "ABC-002");
        assert_eq!(items[1].amount.as_deref(), Some("20.000"));
    }

    #[test]
    fn test_columns_broken_across_lines() {
        let items = extract("1   ABC-001   Steel Bolt\n   M6\n   10   5.000   0   50.000");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "Steel Bolt M6");
        assert_eq!(items[0].quantity, "10");
    }

    #[test]
    fn test_rejected_match_is_skipped() {
        let items = extract(
            "1   ABC-001   Steel Bolt M6   0   5.000   0   0\n\
             2   ABC-002   Washer 6mm   20   1.000   0   20.000",
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].no, "2");
    }

    #[test]
    fn test_bad_quantity_does_not_swallow_next_row() {
        let items = extract(
            "1   ABC-001   Steel Bolt M6   ten   5.000   0   50.000   \
             2   ABC-002   Washer 6mm   20   1.000   0   20.000",
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].no, "2");
        assert_eq!(items[0].item_code, "ABC-002");
        assert_eq!(items[0].description, "Washer 6mm");
        assert_eq!(items[0].quantity, "20");
    }

    #[test]
    fn test_digits_inside_item_code_are_not_an_ordinal() {
        assert!(extract("Item ABC-12   XY-01   Steel Bolt M6   10   5.000   0   50.000").is_empty());
    }
}
