// src/error.rs

use actix_web::error::BlockingError;
use std::path::PathBuf;
use stock_data::DataError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to read settings from {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid selection: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("Dashboard refresh did not complete: {0}")]
    Blocking(#[from] BlockingError),
}

impl DashboardError {
    /// Errors caused by the request itself rather than the server's data.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Validation(_)
                | DashboardError::Data(DataError::UnknownTicker(_))
                | DashboardError::Data(DataError::InvalidMonth(_))
        )
    }
}
