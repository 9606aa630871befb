// src/stats.rs

use crate::models::{parse_month, DataError, FilterSelection, TickerHistory};
use chrono::Month;
use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";

/// Rows of `history` whose date falls in the given year and month, in their
/// original order.
pub fn filter(history: &TickerHistory, year: i32, month: Month) -> TickerHistory {
    TickerHistory {
        ticker: history.ticker.clone(),
        columns: history.columns,
        records: history
            .records
            .iter()
            .filter(|r| r.year() == year && r.month() == month)
            .cloned()
            .collect(),
    }
}

pub fn filter_selection(
    history: &TickerHistory,
    selection: &FilterSelection,
) -> Result<TickerHistory, DataError> {
    let month = parse_month(&selection.month)?;
    Ok(filter(history, selection.year, month))
}

/// Open/high/low/close summary of a (filtered) history.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl SummaryStats {
    pub fn compute(history: &TickerHistory) -> Self {
        let records = &history.records;
        let columns = history.columns;

        let open = if columns.open {
            records.first().and_then(|r| r.open)
        } else {
            None
        };
        let high = if columns.high {
            records.iter().filter_map(|r| r.high).reduce(f64::max)
        } else {
            None
        };
        let low = if columns.low {
            records.iter().filter_map(|r| r.low).reduce(f64::min)
        } else {
            None
        };

        SummaryStats {
            open,
            high,
            low,
            close: history.last_close(),
        }
    }
}

/// Renders a stat for its card. Zero is shown as "N/A", the same as a
/// missing value.
pub fn display_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_currency(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `1234.5` -> `$1,234.50`; negatives keep the sign after the dollar sign.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("${sign}{grouped}.{fraction}")
}
