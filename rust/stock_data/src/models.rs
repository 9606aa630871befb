// src/models.rs

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Missing required column '{column}' in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("Invalid {column} value '{value}' on line {line}")]
    InvalidNumber {
        column: String,
        value: String,
        line: u64,
    },
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),
    #[error("Invalid month name: {0}")]
    InvalidMonth(String),
}

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Parses a month name ("June", "jun", "JUNE") into a calendar month.
pub fn parse_month(name: &str) -> Result<Month, DataError> {
    name.trim()
        .parse::<Month>()
        .map_err(|_| DataError::InvalidMonth(name.to_string()))
}

/// One row of a ticker's price history.
///
/// Year and month are never stored; they are read off `date`, so they cannot
/// drift from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerRecord {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    /// Close-equivalent value (see [`CloseColumn`]).
    pub close: Option<f64>,
    pub volume: Option<i64>,
}

impl TickerRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> Month {
        MONTHS[self.date.month0() as usize]
    }

    pub fn month_name(&self) -> &'static str {
        self.month().name()
    }
}

/// Which header supplied the close-equivalent price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseColumn {
    CloseLast,
    Close,
}

impl CloseColumn {
    pub fn header(&self) -> &'static str {
        match self {
            CloseColumn::CloseLast => "closelast",
            CloseColumn::Close => "close",
        }
    }
}

/// Optional columns carried by a source file. Date and close are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    pub open: bool,
    pub high: bool,
    pub low: bool,
    pub volume: bool,
    pub close: CloseColumn,
}

impl ColumnSet {
    pub fn has_ohlc(&self) -> bool {
        self.open && self.high && self.low
    }
}

/// All rows loaded for one ticker, in source-file order.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerHistory {
    pub ticker: String,
    pub columns: ColumnSet,
    pub records: Vec<TickerRecord>,
}

impl TickerHistory {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Latest date present, regardless of row order.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).max()
    }

    /// Close-equivalent value of the final row.
    pub fn last_close(&self) -> Option<f64> {
        self.records.last().and_then(|r| r.close)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FilterSelection {
    #[validate(length(min = 1, max = 16))]
    pub ticker: String,
    #[validate(range(min = 1, max = 9999))]
    pub year: i32,
    #[validate(length(min = 3, max = 9))]
    pub month: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub predicted_close: f64,
}
