//! Run-join then column-split.
//!
//! Renderers often wrap a long description onto the next physical line.
//! Rows are rebuilt first: a line starting with a bare integer opens a row
//! and following lines are continuations. Each rebuilt row is then split on
//! runs of three or more whitespace characters.

use tracing::trace;

use crate::error::RowRejection;
use crate::models::purchase_order::LineItem;
use crate::order::rules::patterns::{ROW_START, WIDE_GAP};
use crate::order::rules::{is_row_terminator, CandidateRow, LineItemValidator};

use super::{LineItemStrategy, StrategyKind};

/// Columns: no, item code, description, quantity, unit price, discount, amount.
const MIN_COLUMNS: usize = 7;

/// A table row rebuilt from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRow {
    /// Row text; continuation lines are joined with a single space while
    /// the row is still short of columns.
    pub text: String,
    /// Lines that followed an already complete row; they extend the
    /// description column.
    pub overflow: Vec<String>,
}

impl LogicalRow {
    fn new(line: &str) -> Self {
        Self {
            text: line.to_string(),
            overflow: Vec::new(),
        }
    }

    fn push_continuation(&mut self, line: &str) {
        if self.overflow.is_empty() && split_columns(&self.text).len() < MIN_COLUMNS {
            self.text.push(' ');
            self.text.push_str(line);
        } else {
            self.overflow.push(line.to_string());
        }
    }
}

/// Rebuild logical rows from the physical lines of a table.
///
/// Lines before the first row are ignored. A footer, signature or
/// `Label:` line closes the current row.
pub fn reassemble_rows(table: &str) -> Vec<LogicalRow> {
    let mut rows = Vec::new();
    let mut current: Option<LogicalRow> = None;

    for line in table.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if ROW_START.is_match(line) {
            rows.extend(current.take());
            current = Some(LogicalRow::new(line));
        } else if is_row_terminator(line) {
            rows.extend(current.take());
        } else if let Some(row) = current.as_mut() {
            row.push_continuation(line);
        }
    }

    rows.extend(current);
    rows
}

fn split_columns(text: &str) -> Vec<&str> {
    WIDE_GAP.split(text.trim()).collect()
}

/// Strategy 1: re-join wrapped rows, then split columns on wide gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunJoinStrategy;

impl LineItemStrategy for RunJoinStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RunJoin
    }

    fn extract(&self, table: &str, validator: &LineItemValidator) -> Vec<LineItem> {
        let mut items = Vec::new();

        for row in reassemble_rows(table) {
            let columns = split_columns(&row.text);
            if columns.len() < MIN_COLUMNS {
                let reason = RowRejection::TooFewColumns {
                    expected: MIN_COLUMNS,
                    found: columns.len(),
                };
                trace!("Row {:?} rejected: {}", row.text, reason);
                continue;
            }

            let description = if row.overflow.is_empty() {
                columns[2].to_string()
            } else {
                format!("{} {}", columns[2], row.overflow.join(" "))
            };

            let candidate = CandidateRow::new(columns[0], columns[1], &description, columns[3])
                .with_prices(columns[4], columns[5], columns[6]);

            match validator.validate(&candidate) {
                Ok(item) => items.push(item),
                Err(reason) => trace!("Row {:?} rejected: {}", row.text, reason),
            }
        }

        items
    }
}
