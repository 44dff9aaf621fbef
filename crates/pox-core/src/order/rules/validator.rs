//! Shared acceptance rules for candidate table rows.
//!
//! Every parsing strategy funnels its candidates through
//! [`LineItemValidator::validate`], which is the only place a [`LineItem`]
//! is constructed.

use crate::error::RowRejection;
use crate::models::purchase_order::LineItem;

use super::normalize::collapse_whitespace;
use super::patterns::{INTEGER, ITEM_CODE, NUMERIC};

/// Minimum item code length.
pub const MIN_ITEM_CODE_LEN: usize = 2;
/// Minimum description length after collapsing whitespace.
pub const MIN_DESCRIPTION_LEN: usize = 3;
/// Maximum description length after collapsing whitespace.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Raw column values of one candidate row.
///
/// Price columns are `None` when the strategy does not capture them.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateRow<'a> {
    pub no: &'a str,
    pub item_code: &'a str,
    pub description: &'a str,
    pub quantity: &'a str,
    pub unit_price: Option<&'a str>,
    pub discount: Option<&'a str>,
    pub amount: Option<&'a str>,
}

impl<'a> CandidateRow<'a> {
    /// A row with the four item columns and no price columns.
    pub fn new(no: &'a str, item_code: &'a str, description: &'a str, quantity: &'a str) -> Self {
        Self {
            no,
            item_code,
            description,
            quantity,
            ..Default::default()
        }
    }

    /// Attach unit price, discount and amount columns.
    pub fn with_prices(mut self, unit_price: &'a str, discount: &'a str, amount: &'a str) -> Self {
        self.unit_price = Some(unit_price);
        self.discount = Some(discount);
        self.amount = Some(amount);
        self
    }
}

/// Predicate set applied to every candidate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemValidator {
    max_ordinal: u32,
    max_quantity: u32,
}

impl LineItemValidator {
    /// Create a validator with the default bounds (ordinal ≤ 100, quantity ≤ 9999).
    pub fn new() -> Self {
        Self {
            max_ordinal: 100,
            max_quantity: 9999,
        }
    }

    /// Set the largest accepted ordinal.
    pub fn with_max_ordinal(mut self, max: u32) -> Self {
        self.max_ordinal = max;
        self
    }

    /// Set the largest accepted quantity.
    pub fn with_max_quantity(mut self, max: u32) -> Self {
        self.max_quantity = max;
        self
    }

    /// Check every column and build the line item.
    pub fn validate(&self, row: &CandidateRow<'_>) -> Result<LineItem, RowRejection> {
        let no = row.no.trim();
        if !bounded_integer(no, self.max_ordinal) {
            return Err(RowRejection::Ordinal(no.to_string()));
        }

        let item_code = row.item_code.trim();
        if item_code.chars().count() < MIN_ITEM_CODE_LEN || !ITEM_CODE.is_match(item_code) {
            return Err(RowRejection::ItemCode(item_code.to_string()));
        }

        let description = collapse_whitespace(row.description);
        let len = description.chars().count();
        if !(MIN_DESCRIPTION_LEN..=MAX_DESCRIPTION_LEN).contains(&len) {
            return Err(RowRejection::DescriptionLength(len));
        }

        let quantity = row.quantity.trim();
        if !bounded_integer(quantity, self.max_quantity) {
            return Err(RowRejection::Quantity(quantity.to_string()));
        }

        let unit_price = numeric_column("unit price", row.unit_price)?;
        let discount = numeric_column("discount", row.discount)?;
        let amount = numeric_column("amount", row.amount)?;

        Ok(LineItem {
            no: no.to_string(),
            item_code: item_code.to_string(),
            description,
            quantity: quantity.to_string(),
            unit_price,
            discount,
            amount,
        })
    }

    /// Whether the row passes every predicate.
    pub fn accepts(&self, row: &CandidateRow<'_>) -> bool {
        self.validate(row).is_ok()
    }
}

impl Default for LineItemValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Digits only, value in `1..=max`. Values that overflow `u32` are out of range.
fn bounded_integer(value: &str, max: u32) -> bool {
    INTEGER.is_match(value)
        && value
            .parse::<u32>()
            .is_ok_and(|n| (1..=max).contains(&n))
}

fn numeric_column(
    column: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, RowRejection> {
    match value.map(str::trim) {
        None => Ok(None),
        Some(v) if NUMERIC.is_match(v) => Ok(Some(v.to_string())),
        Some(v) => Err(RowRejection::Numeric {
            column,
            value: v.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row<'a>(no: &'a str, code: &'a str, desc: &'a str, qty: &'a str) -> CandidateRow<'a> {
        CandidateRow::new(no, code, desc, qty).with_prices("5.000", "0", "50.000")
    }

    #[test]
    fn test_accepts_well_formed_row() {
        let item = LineItemValidator::new()
            .validate(&row("1", "ABC-001", "Steel  Bolt\n M6", "10"))
            .unwrap();

        assert_eq!(item.description, "Steel Bolt M6");
        assert_eq!(item.amount.as_deref(), Some("50.000"));
    }

    #[test]
    fn test_rejects_zero_and_non_numeric_quantity() {
        let validator = LineItemValidator::new();

        assert_eq!(
            validator.validate(&row("1", "ABC-001", "Steel Bolt M6", "0")),
            Err(RowRejection::Quantity("0".to_string()))
        );
        assert_eq!(
            validator.validate(&row("1", "ABC-001", "Steel Bolt M6", "ten")),
            Err(RowRejection::Quantity("ten".to_string()))
        );
        assert!(!validator.accepts(&row("1", "ABC-001", "Steel Bolt M6", "1.5")));
    }

    #[test]
    fn test_quantity_bound_is_configurable() {
        let candidate = row("1", "ABC-001", "Steel Bolt M6", "250");

        assert!(LineItemValidator::new().accepts(&candidate));
        assert!(!LineItemValidator::new().with_max_quantity(100).accepts(&candidate));
        assert!(!LineItemValidator::new().accepts(&row("1", "ABC-001", "Steel Bolt M6", "10000")));
    }

    #[test]
    fn test_ordinal_bounds() {
        let validator = LineItemValidator::new();

        assert!(validator.accepts(&row("100", "ABC-001", "Steel Bolt M6", "1")));
        assert!(!validator.accepts(&row("0", "ABC-001", "Steel Bolt M6", "1")));
        assert!(!validator.accepts(&row("101", "ABC-001", "Steel Bolt M6", "1")));
        assert!(!validator.accepts(&row("99999999999", "ABC-001", "Steel Bolt M6", "1")));
    }

    #[test]
    fn test_item_code_rules() {
        let validator = LineItemValidator::new();

        assert!(validator.accepts(&row("1", "A1", "Steel Bolt M6", "1")));
        assert!(!validator.accepts(&row("1", "A", "Steel Bolt M6", "1")));
        assert!(!validator.accepts(&row("1", "AB/01", "Steel Bolt M6", "1")));
    }

    #[test]
    fn test_description_length() {
        let validator = LineItemValidator::new();
        let long = "x".repeat(501);

        assert_eq!(
            validator.validate(&row("1", "ABC-001", " M6 ", "1")),
            Err(RowRejection::DescriptionLength(2))
        );
        assert_eq!(
            validator.validate(&row("1", "ABC-001", &long, "1")),
            Err(RowRejection::DescriptionLength(501))
        );
    }

    #[test]
    fn test_price_columns_are_format_checked_only_when_present() {
        let validator = LineItemValidator::new();

        let bare = CandidateRow::new("1", "ABC-001", "Steel Bolt M6", "10");
        assert_eq!(validator.validate(&bare).unwrap().unit_price, None);

        let bad_price = bare.with_prices("Rp 5.000", "0", "50.000");
        assert!(matches!(
            validator.validate(&bad_price),
            Err(RowRejection::Numeric { column: "unit price", .. })
        ));
    }
}
