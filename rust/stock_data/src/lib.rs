// src/lib.rs

pub mod catalog;
pub mod loader;
pub mod models;
pub mod projection;
pub mod stats;

pub use catalog::{order_months, FilterOptions, TickerCatalog, TickerSource};
pub use models::{
    parse_month, CloseColumn, ColumnSet, DataError, FilterSelection, PredictionPoint,
    TickerHistory, TickerRecord,
};
pub use stats::SummaryStats;
