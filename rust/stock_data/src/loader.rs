// src/loader.rs

use crate::models::{CloseColumn, ColumnSet, DataError, TickerHistory, TickerRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Cell contents that mean "no value", matched after trimming.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

/// Trim, lower-case, and strip spaces and slashes: `"Close/Last"` -> `closelast`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '/')
        .collect()
}

/// Parses a date cell, returning `None` for anything unrecognised.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Strips `$` and `,` from a price cell. Empty cells and `N/A`-style
/// placeholders are missing values.
pub fn parse_price(raw: &str, column: &str, line: u64) -> Result<Option<f64>, DataError> {
    if is_missing(raw.trim()) {
        return Ok(None);
    }
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let value = cleaned
        .parse::<f64>()
        .map_err(|_| invalid_number(column, raw, line))?;
    Ok(value.is_finite().then_some(value))
}

pub fn parse_volume(raw: &str, line: u64) -> Result<Option<i64>, DataError> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if is_missing(cleaned) {
        return Ok(None);
    }

    if let Ok(volume) = cleaned.parse::<i64>() {
        return Ok(Some(volume));
    }
    match cleaned.parse::<f64>() {
        Ok(volume) if volume.is_finite() => Ok(Some(volume.round() as i64)),
        _ => Err(invalid_number("volume", raw, line)),
    }
}

fn invalid_number(column: &str, raw: &str, line: u64) -> DataError {
    DataError::InvalidNumber {
        column: column.to_string(),
        value: raw.to_string(),
        line,
    }
}

/// Column positions resolved from a header row.
///
/// Priority: `closelast` wins over `close`; `date` and one close variant are
/// required, `open`/`high`/`low`/`volume` are optional, anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    date: usize,
    close: usize,
    close_column: CloseColumn,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

impl Schema {
    pub fn resolve(headers: &StringRecord, source: &Path) -> Result<Self, DataError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| normalized.iter().position(|h| h == name);
        let missing = |column: &str| DataError::MissingColumn {
            path: source.to_path_buf(),
            column: column.to_string(),
        };

        let date = find("date").ok_or_else(|| missing("date"))?;
        let (close, close_column) = match (find("closelast"), find("close")) {
            (Some(index), _) => (index, CloseColumn::CloseLast),
            (None, Some(index)) => (index, CloseColumn::Close),
            (None, None) => return Err(missing("close")),
        };

        Ok(Schema {
            date,
            close,
            close_column,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            volume: find("volume"),
        })
    }

    pub fn columns(&self) -> ColumnSet {
        ColumnSet {
            open: self.open.is_some(),
            high: self.high.is_some(),
            low: self.low.is_some(),
            volume: self.volume.is_some(),
            close: self.close_column,
        }
    }

    /// Converts one data row. `Ok(None)` means the date did not parse and the
    /// row is to be dropped.
    pub fn parse_row(&self, row: &StringRecord, line: u64) -> Result<Option<TickerRecord>, DataError> {
        let cell = move |index: usize| row.get(index).unwrap_or("");
        let price = move |index: Option<usize>, column: &str| match index {
            Some(index) => parse_price(cell(index), column, line),
            None => Ok(None),
        };

        let Some(date) = parse_date(cell(self.date)) else {
            return Ok(None);
        };

        Ok(Some(TickerRecord {
            date,
            open: price(self.open, "open")?,
            high: price(self.high, "high")?,
            low: price(self.low, "low")?,
            close: price(Some(self.close), self.close_column.header())?,
            volume: match self.volume {
                Some(index) => parse_volume(cell(index), line)?,
                None => None,
            },
        }))
    }
}

/// Loads a ticker's CSV file from disk.
pub fn load_history(path: &Path, ticker: &str) -> Result<TickerHistory, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_history(file, ticker, path)
}

/// Reads CSV data from any reader; `source` is only used in error messages.
pub fn read_history<R: Read>(reader: R, ticker: &str, source: &Path) -> Result<TickerHistory, DataError> {
    let csv_error = |source_err: csv::Error| DataError::Csv {
        path: source.to_path_buf(),
        source: source_err,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let schema = Schema::resolve(&headers, source)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        match schema.parse_row(&row, line)? {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    debug!(
        ticker,
        source = %source.display(),
        rows = records.len(),
        dropped,
        "loaded price history"
    );

    Ok(TickerHistory {
        ticker: ticker.to_string(),
        columns: schema.columns(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NASDAQ: &str = "\
Date,Close/Last,Volume,Open,High,Low
06/30/2023,$193.97,\"85,213,220\",$191.63,$194.48,$191.26
06/29/2023,$189.59,46347310,$189.08,$190.07,$188.94
garbage,$1.00,1,$1.00,$1.00,$1.00
,$2.00,2,$2.00,$2.00,$2.00
";

    fn read(data: &str) -> Result<TickerHistory, DataError> {
        read_history(data.as_bytes(), "TEST", Path::new("test.csv"))
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Close/Last"), "closelast");
        assert_eq!(normalize_header("  Prev Close "), "prevclose");
        assert_eq!(normalize_header("\u{feff}Date"), "date");
        assert_eq!(normalize_header("VOLUME"), "volume");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 6, 30);
        assert_eq!(parse_date("2023-06-30"), expected);
        assert_eq!(parse_date("06/30/2023"), expected);
        assert_eq!(parse_date("2023/06/30"), expected);
        assert_eq!(parse_date("30-Jun-2023"), expected);
        assert_eq!(parse_date("Jun 30, 2023"), expected);
        assert_eq!(parse_date("2023-06-30 16:00:00"), expected);
        assert_eq!(parse_date("2023-06-30T16:00:00+00:00"), expected);
        assert_eq!(parse_date("13/45/2023"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn test_parse_price_strips_currency_noise() {
        assert_eq!(parse_price("$1,234.50", "open", 2).unwrap(), Some(1234.5));
        assert_eq!(parse_price(" 17 ", "open", 2).unwrap(), Some(17.0));
        assert_eq!(parse_price("", "open", 2).unwrap(), None);
        assert_eq!(parse_price("$", "open", 2).unwrap(), None);
        assert!(matches!(
            parse_price("$12abc", "high", 7),
            Err(DataError::InvalidNumber { column, line: 7, .. }) if column == "high"
        ));
    }

    #[test]
    fn test_placeholder_cells_are_missing() {
        for token in ["N/A", "NA", "null", "#N/A", " NaN "] {
            assert_eq!(parse_price(token, "open", 2).unwrap(), None, "{}", token);
            assert_eq!(parse_volume(token, 2).unwrap(), None, "{}", token);
        }
        assert!(parse_price("N/A!", "open", 2).is_err());
    }

    #[test]
    fn test_read_history_keeps_rows_with_placeholder_prices() {
        let data = "date,close,open\n2023-06-01,10.0,N/A\n2022-01-03,null,9\n";
        let history = read(data).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history.records[0].open, None);
        assert_eq!(history.records[0].close, Some(10.0));
        assert_eq!(history.records[1].close, None);
        assert_eq!(history.records[1].open, Some(9.0));
    }

    #[test]
    fn test_parse_volume() {
        assert_eq!(parse_volume("85,213,220", 2).unwrap(), Some(85_213_220));
        assert_eq!(parse_volume("1200.0", 2).unwrap(), Some(1200));
        assert_eq!(parse_volume("", 2).unwrap(), None);
        assert!(parse_volume("lots", 2).is_err());
    }

    #[test]
    fn test_read_history_drops_unparseable_dates() {
        let history = read(NASDAQ).unwrap();

        assert_eq!(history.len(), 2);
        assert!(history
            .records
            .iter()
            .all(|r| r.date.format("%Y").to_string() == "2023"));
        assert_eq!(history.records[0].date, NaiveDate::from_ymd_opt(2023, 6, 30).unwrap());
        assert_eq!(history.records[0].close, Some(193.97));
        assert_eq!(history.records[0].volume, Some(85_213_220));
        assert_eq!(history.records[1].open, Some(189.08));
    }

    #[test]
    fn test_schema_prefers_close_last() {
        let data = "date,close,close/last\n2023-01-03,1.0,2.0\n";
        let history = read(data).unwrap();

        assert_eq!(history.columns.close, CloseColumn::CloseLast);
        assert_eq!(history.records[0].close, Some(2.0));
    }

    #[test]
    fn test_optional_columns_absent() {
        let data = " Date , Close \n2020-03-02,10.5\n";
        let history = read(data).unwrap();

        assert_eq!(
            history.columns,
            ColumnSet {
                open: false,
                high: false,
                low: false,
                volume: false,
                close: CloseColumn::Close,
            }
        );
        assert_eq!(history.records[0].open, None);
        assert_eq!(history.records[0].close, Some(10.5));
    }

    #[test]
    fn test_missing_required_columns() {
        assert!(matches!(
            read("close,open\n1,2\n"),
            Err(DataError::MissingColumn { column, .. }) if column == "date"
        ));
        assert!(matches!(
            read("date,open\n2023-01-03,2\n"),
            Err(DataError::MissingColumn { column, .. }) if column == "close"
        ));
    }

    #[test]
    fn test_bad_price_on_valid_row_is_an_error() {
        let data = "date,close\n2023-01-03,1.0\n2023-01-04,one\n";
        assert!(matches!(
            read(data),
            Err(DataError::InvalidNumber { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_history(Path::new("does/not/exist.csv"), "NONE").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
