// src/dashboard.rs

use crate::charts::{
    candlestick_figure, high_low_figure, prediction_figure, volume_figure, Figure,
};
use crate::config::Settings;
use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use stock_data::projection::{project_history, write_predictions};
use stock_data::stats::{display_stat, filter_selection};
use stock_data::{DataError, FilterOptions, FilterSelection, SummaryStats, TickerCatalog};
use tracing::{info, warn};
use validator::Validate;

pub const NO_DATA_MESSAGE: &str = "No data available.";

/// Read-only state built once at startup and shared by every request.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub settings: Settings,
    pub catalog: TickerCatalog,
    pub options: FilterOptions,
}

impl DashboardState {
    /// Scans every ticker file; any unreadable file aborts startup.
    pub fn initialize(settings: Settings) -> Result<Self, DataError> {
        let catalog = settings.catalog();
        let options = FilterOptions::scan(&catalog)?;
        info!(
            tickers = options.tickers.len(),
            years = options.years.len(),
            months = options.months.len(),
            "filter options ready"
        );

        Ok(DashboardState {
            settings,
            catalog,
            options,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub class: String,
}

impl StatCard {
    fn new(label: &str, value: Option<f64>, class: &str) -> Self {
        StatCard {
            label: label.to_string(),
            value: display_stat(value),
            class: class.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatsPanel {
    Cards { cards: Vec<StatCard> },
    Placeholder { message: String },
}

impl StatsPanel {
    pub fn from_stats(stats: &SummaryStats) -> Self {
        StatsPanel::Cards {
            cards: vec![
                StatCard::new("Open", stats.open, "card"),
                StatCard::new("High", stats.high, "card green"),
                StatCard::new("Low", stats.low, "card red"),
                StatCard::new("Close", stats.close, "card"),
            ],
        }
    }

    pub fn no_data() -> Self {
        StatsPanel::Placeholder {
            message: NO_DATA_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub selection: FilterSelection,
    pub stats: StatsPanel,
    pub volume_chart: Figure,
    pub scatter_chart: Figure,
    pub candlestick_chart: Figure,
    pub prediction_chart: Figure,
    /// Path of the predictions CSV written during this refresh, if any.
    pub predictions_file: Option<String>,
}

impl DashboardResponse {
    fn no_data(selection: FilterSelection) -> Self {
        DashboardResponse {
            selection,
            stats: StatsPanel::no_data(),
            volume_chart: Figure::empty(),
            scatter_chart: Figure::empty(),
            candlestick_chart: Figure::empty(),
            prediction_chart: Figure::empty(),
            predictions_file: None,
        }
    }
}

/// Recomputes the whole dashboard for one selection.
///
/// The ticker file is re-read on every call. A non-empty selection also
/// rewrites `predictions_<TICKER>.csv` in the configured output directory.
pub fn refresh(
    state: &DashboardState,
    selection: &FilterSelection,
) -> Result<DashboardResponse, DashboardError> {
    selection.validate()?;

    let history = state.catalog.load(&selection.ticker)?;
    let filtered = filter_selection(&history, selection)?;
    if filtered.is_empty() {
        info!(?selection, "no rows for selection");
        return Ok(DashboardResponse::no_data(selection.clone()));
    }

    let stats = SummaryStats::compute(&filtered);
    let predictions = project_history(&filtered).unwrap_or_default();

    let predictions_file = if predictions.is_empty() {
        warn!(ticker = %selection.ticker, "last row has no close value, skipping projection");
        None
    } else {
        match write_predictions(&state.settings.output_dir, &selection.ticker, &predictions) {
            Ok(path) => Some(path.display().to_string()),
            Err(err) => {
                warn!(error = %err, "failed to write predictions");
                None
            }
        }
    };

    info!(?selection, rows = filtered.len(), "dashboard refreshed");

    Ok(DashboardResponse {
        selection: selection.clone(),
        stats: StatsPanel::from_stats(&stats),
        volume_chart: volume_figure(&filtered),
        scatter_chart: high_low_figure(&filtered),
        candlestick_chart: candlestick_figure(&filtered),
        prediction_chart: prediction_figure(&filtered, &predictions),
        predictions_file,
    })
}
