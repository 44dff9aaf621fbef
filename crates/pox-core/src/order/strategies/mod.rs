//! Line-item parsing strategies and the cascade that picks between them.
//!
//! Strategies are tried in a fixed order, strictest first. The first one
//! that produces at least one validated item decides the result; a table no
//! strategy understands yields an empty list.

mod flexible;
mod multi_group;
mod run_join;

pub use flexible::FlexibleLineStrategy;
pub use multi_group::MultiGroupStrategy;
pub use run_join::{reassemble_rows, LogicalRow, RunJoinStrategy};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::purchase_order::LineItem;

use super::rules::LineItemValidator;

/// Identifies a parsing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Rows re-joined across wrapped lines, split on wide gaps.
    RunJoin,
    /// One seven-column pattern scanned over the whole table text.
    MultiGroup,
    /// Per-line split on double spaces, with a loose single-space retry.
    FlexibleLine,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::RunJoin => write!(f, "run_join"),
            StrategyKind::MultiGroup => write!(f, "multi_group"),
            StrategyKind::FlexibleLine => write!(f, "flexible_line"),
        }
    }
}

/// A self-contained row extraction algorithm.
///
/// Implementations must be total: any input text yields a (possibly empty)
/// list of items, each built by `validator`, in input order.
pub trait LineItemStrategy: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Extract validated line items from table text.
    fn extract(&self, table: &str, validator: &LineItemValidator) -> Vec<LineItem>;
}

/// Items produced by the cascade, and the strategy that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Strategy whose output was taken, or `None` if none found items.
    pub strategy: Option<StrategyKind>,
    /// Validated items in document order.
    pub items: Vec<LineItem>,
}

/// Runs strategies in priority order; first non-empty result wins.
#[derive(Clone)]
pub struct CascadingLineItemParser {
    strategies: Vec<Arc<dyn LineItemStrategy>>,
    validator: LineItemValidator,
}

impl CascadingLineItemParser {
    /// Create the standard cascade: run-join, multi-group, flexible line.
    pub fn new(validator: LineItemValidator) -> Self {
        Self::with_strategies(
            validator,
            vec![
                Arc::new(RunJoinStrategy),
                Arc::new(MultiGroupStrategy),
                Arc::new(FlexibleLineStrategy),
            ],
        )
    }

    /// Create a cascade over a custom, ordered strategy list.
    pub fn with_strategies(
        validator: LineItemValidator,
        strategies: Vec<Arc<dyn LineItemStrategy>>,
    ) -> Self {
        Self {
            strategies,
            validator,
        }
    }

    /// Strategy order.
    pub fn strategies(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Extract line items from table text.
    pub fn parse(&self, table: &str) -> Vec<LineItem> {
        self.parse_with_strategy(table).items
    }

    /// Extract line items and report which strategy produced them.
    pub fn parse_with_strategy(&self, table: &str) -> CascadeOutcome {
        self.strategies
            .iter()
            .find_map(|strategy| {
                let items = strategy.extract(table, &self.validator);
                if items.is_empty() {
                    debug!("Strategy {} found no items", strategy.kind());
                    None
                } else {
                    debug!("Strategy {} found {} items", strategy.kind(), items.len());
                    Some(CascadeOutcome {
                        strategy: Some(strategy.kind()),
                        items,
                    })
                }
            })
            .unwrap_or_default()
    }
}

impl Default for CascadingLineItemParser {
    fn default() -> Self {
        Self::new(LineItemValidator::default())
    }
}

impl std::fmt::Debug for CascadingLineItemParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadingLineItemParser")
            .field("strategies", &self.strategies())
            .field("validator", &self.validator)
            .finish()
    }
}
