//! Common regex patterns for purchase-order extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Day-first or year-first numeric date, e.g. `15/01/2024`, `15-01-24`, `2024.01.15`.
const NUMERIC_DATE: &str =
    r"(?:\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}|\d{1,2}[/.\-]\d{1,2}[/.\-](?:\d{4}|\d{2}))";

/// Day, month word, four-digit year, e.g. `15 January 2024`, `15 Jan. 2024`.
const LONG_DATE: &str = r"\d{1,2}\s+[A-Za-z]{3,9}\.?\s+\d{4}";

lazy_static! {
    // PO number
    pub static ref PO_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)\b(?:PO\s*(?:Number|No\.?|#)|Order\s*(?:Number|No\.?))[ \t]*[:\-][ \t]*(\S{5,})"
    ).unwrap();

    pub static ref PO_NUMBER_BARE: Regex = Regex::new(
        r"\bPO(?:[-/]?[A-Z0-9]+)+\b"
    ).unwrap();

    // PO date
    pub static ref PO_DATE_LABELED: Regex = Regex::new(
        &format!(r"(?i)\bPO\s*Date[ \t]*:[ \t]*({NUMERIC_DATE})\b")
    ).unwrap();

    pub static ref PO_DATE_LABELED_LONG: Regex = Regex::new(
        &format!(r"(?i)\bPO\s*Date[ \t]*:[ \t]*({LONG_DATE})\b")
    ).unwrap();

    pub static ref DATE_LABELED: Regex = Regex::new(
        &format!(r"(?i)\b(?:Date|Tanggal)[ \t]*:[ \t]*({NUMERIC_DATE})\b")
    ).unwrap();

    pub static ref DATE_LABELED_LONG: Regex = Regex::new(
        &format!(r"(?i)\b(?:Date|Tanggal)[ \t]*:[ \t]*({LONG_DATE})\b")
    ).unwrap();

    pub static ref DATE_BARE: Regex = Regex::new(
        &format!(r"\b({NUMERIC_DATE})\b")
    ).unwrap();

    // Free-text description below the table
    pub static ref DESCRIPTION: Regex = Regex::new(
        r"(?i)\bDescription[ \t]*[-:][ \t]*([^\r\n]+)"
    ).unwrap();

    // Table header: No, Item (Code), Description, Qty
    pub static ref TABLE_START: Regex = Regex::new(
        r"(?i)\bNo\.?\s+Item(?:\s*Code)?\s+(?:Description|Desc\.?)\s+(?:Qty|Quantity)\b"
    ).unwrap();

    // Default closing phrase of the table
    pub static ref TABLE_END: Regex = Regex::new(r"(?i)\bRequested\s+By").unwrap();

    // Lines that close a table: totals and tax
    pub static ref FOOTER_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:total|subtotal|sub\s+total|tax|grand|ppn)\b"
    ).unwrap();

    // Lines that open a non-table section: signatures and "Label:" lines
    pub static ref SECTION_LABEL: Regex = Regex::new(
        r"(?i)^(?:(?:requested|approved|prepared|checked|received)\s+by\b|[A-Za-z][A-Za-z .]{0,30}:)"
    ).unwrap();

    // Row boundaries and column separators
    pub static ref ROW_START: Regex = Regex::new(r"^\d+\s").unwrap();
    pub static ref WIDE_GAP: Regex = Regex::new(r"\s{3,}").unwrap();
    pub static ref GAP: Regex = Regex::new(r"\s{2,}").unwrap();

    // Whole-table 7-column scan: no, code, description, qty, price, discount, amount
    // The ordinal must follow a line start or whitespace, never a code like ABC-12
    pub static ref SEVEN_COLUMN_ROW: Regex = Regex::new(
        r"(?m)(?:^|\s)(\d+)\s{3,}([\w-]+)\s{3,}(\S(?s:.*?))\s{3,}(\d+)\s{3,}([\d,.]+)\s{3,}([\d,.]+)\s{3,}([\d,.]+)"
    ).unwrap();

    // Another row's ordinal and item code inside a captured description
    pub static ref EMBEDDED_ROW_START: Regex = Regex::new(r"\s{3,}\d+\s{3,}[\w-]+\s{3,}").unwrap();

    // Single-space tolerant row: no, code, description, qty, then a number
    pub static ref LOOSE_ROW: Regex = Regex::new(
        r"^(\d+)\s+(\S+)\s+(.+?)\s+(\d+)\s+[\d,.]+"
    ).unwrap();

    // Column validation
    pub static ref INTEGER: Regex = Regex::new(r"^[0-9]+$").unwrap();
    pub static ref ITEM_CODE: Regex = Regex::new(r"^[\w-]+$").unwrap();
    pub static ref NUMERIC: Regex = Regex::new(r"^[0-9,.]+$").unwrap();
}
