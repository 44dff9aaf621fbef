//! Data models: the purchase-order record, configuration, and spreadsheet rows.

pub mod config;
pub mod purchase_order;
pub mod sheet;
