//! Flexible per-line scan for tables with narrow column gaps.

use tracing::trace;

use crate::models::purchase_order::LineItem;
use crate::order::rules::patterns::{GAP, INTEGER, LOOSE_ROW};
use crate::order::rules::{is_footer_line, CandidateRow, LineItemValidator};

use super::{LineItemStrategy, StrategyKind};

/// Lines shorter than this cannot hold a row.
const MIN_LINE_LEN: usize = 10;

/// Columns: no, item code, description, quantity.
const MIN_COLUMNS: usize = 4;

/// Strategy 3: split each line on double spaces, retry with a
/// single-space tolerant pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexibleLineStrategy;

impl FlexibleLineStrategy {
    fn parse_line(&self, line: &str, validator: &LineItemValidator) -> Option<LineItem> {
        let columns: Vec<&str> = GAP.split(line).collect();
        if columns.len() >= MIN_COLUMNS && INTEGER.is_match(columns[0]) {
            let candidate = CandidateRow::new(columns[0], columns[1], columns[2], columns[3]);
            match validator.validate(&candidate) {
                Ok(item) => return Some(item),
                Err(reason) => trace!("Line {:?} split rejected: {}", line, reason),
            }
        }

        let caps = LOOSE_ROW.captures(line)?;
        let candidate = CandidateRow::new(&caps[1], &caps[2], &caps[3], &caps[4]);
        validator
            .validate(&candidate)
            .inspect_err(|reason| trace!("Line {:?} rejected: {}", line, reason))
            .ok()
    }
}

impl LineItemStrategy for FlexibleLineStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FlexibleLine
    }

    fn extract(&self, table: &str, validator: &LineItemValidator) -> Vec<LineItem> {
        table
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() >= MIN_LINE_LEN)
            .filter(|line| !is_footer_line(line))
            .filter_map(|line| self.parse_line(line, validator))
            .collect()
    }
}
