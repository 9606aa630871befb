// src/catalog.rs

use crate::loader::load_history;
use crate::models::{parse_month, DataError, FilterSelection, TickerHistory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// A ticker symbol and the CSV file that holds its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSource {
    pub symbol: String,
    pub file: String,
}

impl TickerSource {
    pub fn new(symbol: &str, file: &str) -> Self {
        TickerSource {
            symbol: symbol.to_string(),
            file: file.to_string(),
        }
    }
}

/// Fixed ticker -> file mapping, in display order.
#[derive(Debug, Clone)]
pub struct TickerCatalog {
    data_dir: PathBuf,
    sources: Vec<TickerSource>,
}

impl TickerCatalog {
    pub fn new(data_dir: impl Into<PathBuf>, sources: Vec<TickerSource>) -> Self {
        TickerCatalog {
            data_dir: data_dir.into(),
            sources,
        }
    }

    pub fn with_defaults(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir, Self::default_sources())
    }

    pub fn default_sources() -> Vec<TickerSource> {
        vec![
            TickerSource::new("AAPL", "HistoricalData_Apple.csv"),
            TickerSource::new("AMZN", "HistoricalData_Amazon.csv"),
            TickerSource::new("MSFT", "HistoricalData_Microsoft.csv"),
            TickerSource::new("NFLX", "HistoricalData_Netflix.csv"),
            TickerSource::new("SBUX", "HistoricalData_Starbucks.csv"),
            TickerSource::new("ADANIPORTS", "ADANIPORTS.csv"),
            TickerSource::new("TCS", "TCS.csv"),
            TickerSource::new("TATASTEEL", "TATASTEEL.csv"),
            TickerSource::new("TATAMOTORS", "TATAMOTORS.csv"),
            TickerSource::new("RELIANCE", "RELIANCE.csv"),
        ]
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sources(&self) -> &[TickerSource] {
        &self.sources
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.symbol.as_str())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.sources.iter().any(|s| s.symbol == symbol)
    }

    pub fn path_for(&self, symbol: &str) -> Result<PathBuf, DataError> {
        self.sources
            .iter()
            .find(|s| s.symbol == symbol)
            .map(|s| self.data_dir.join(&s.file))
            .ok_or_else(|| DataError::UnknownTicker(symbol.to_string()))
    }

    /// Reads the ticker's file from disk. Nothing is cached between calls.
    pub fn load(&self, symbol: &str) -> Result<TickerHistory, DataError> {
        let path = self.path_for(symbol)?;
        load_history(&path, symbol)
    }
}

/// Values offered by the ticker/year/month dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub tickers: Vec<String>,
    pub years: Vec<i32>,
    pub months: Vec<String>,
}

impl FilterOptions {
    /// Loads every ticker in the catalog once. The first failing file aborts
    /// the scan.
    pub fn scan(catalog: &TickerCatalog) -> Result<Self, DataError> {
        let mut histories = Vec::with_capacity(catalog.sources().len());
        for symbol in catalog.symbols() {
            let history = catalog.load(symbol)?;
            info!(ticker = symbol, rows = history.len(), "catalog entry loaded");
            histories.push(history);
        }

        let tickers = catalog.symbols().map(str::to_string).collect();
        Ok(Self::from_histories(tickers, &histories))
    }

    pub fn from_histories(tickers: Vec<String>, histories: &[TickerHistory]) -> Self {
        let records = histories.iter().flat_map(|h| h.records.iter());

        let mut years = BTreeSet::new();
        let mut months = BTreeSet::new();
        for record in records {
            years.insert(record.year());
            months.insert((record.month().number_from_month(), record.month_name()));
        }

        FilterOptions {
            tickers,
            years: years.into_iter().collect(),
            months: months
                .into_iter()
                .map(|(_, name)| name.to_string())
                .collect(),
        }
    }

    /// First ticker, earliest year, first calendar month.
    pub fn default_selection(&self) -> Option<FilterSelection> {
        Some(FilterSelection {
            ticker: self.tickers.first()?.clone(),
            year: *self.years.first()?,
            month: self.months.first()?.clone(),
        })
    }
}

/// Sorts month names into calendar order, dropping duplicates.
pub fn order_months<I, S>(names: I) -> Result<Vec<String>, DataError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut months = Vec::new();
    for name in names {
        let month = parse_month(name.as_ref())?;
        if !months.contains(&month) {
            months.push(month);
        }
    }
    months.sort_by_key(|m| m.number_from_month());
    Ok(months.into_iter().map(|m| m.name().to_string()).collect())
}
