// src/projection.rs

use crate::models::{DataError, PredictionPoint, TickerHistory};
use chrono::{Duration, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::info;

/// Monthly compounding rate applied to the last close.
pub const MONTHLY_GROWTH: f64 = 0.02;
pub const HORIZON: u32 = 12;
pub const STEP_DAYS: i64 = 30;

/// Point `i` (1-based) is `(last_date + 30*i days, last_close * 1.02^i)`.
///
/// This is a fixed-rate extrapolation, not a fitted model.
pub fn project(last_date: NaiveDate, last_close: f64) -> Vec<PredictionPoint> {
    (1..=HORIZON)
        .map_while(|i| {
            let date = last_date.checked_add_signed(Duration::days(STEP_DAYS * i as i64))?;
            Some(PredictionPoint {
                date,
                predicted_close: last_close * (1.0 + MONTHLY_GROWTH).powi(i as i32),
            })
        })
        .collect()
}

/// Projects from the latest date and the final row's close. `None` when the
/// history is empty or its last row has no close.
pub fn project_history(history: &TickerHistory) -> Option<Vec<PredictionPoint>> {
    let last_date = history.last_date()?;
    let last_close = history.last_close()?;
    Some(project(last_date, last_close))
}

pub fn predictions_path(dir: &Path, ticker: &str) -> PathBuf {
    dir.join(format!("predictions_{}.csv", ticker))
}

/// Writes `predictions_<TICKER>.csv` (`date,predicted_close`) into `dir`,
/// replacing any previous file.
pub fn write_predictions(
    dir: &Path,
    ticker: &str,
    points: &[PredictionPoint],
) -> Result<PathBuf, DataError> {
    let path = predictions_path(dir, ticker);
    let csv_error = |source: csv::Error| DataError::Csv {
        path: path.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(&path).map_err(csv_error)?;
    if points.is_empty() {
        writer
            .write_record(["date", "predicted_close"])
            .map_err(csv_error)?;
    }
    for point in points {
        writer.serialize(point).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| DataError::Io {
        path: path.clone(),
        source,
    })?;

    info!(ticker, rows = points.len(), path = %path.display(), "predictions written");
    Ok(path)
}
