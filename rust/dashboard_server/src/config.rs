// src/config.rs

use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use stock_data::{TickerCatalog, TickerSource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Directory holding the ticker CSV files.
    pub data_dir: PathBuf,
    /// Where `predictions_<TICKER>.csv` files are written.
    pub output_dir: PathBuf,
    pub tickers: Vec<TickerSource>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
            tickers: TickerCatalog::default_sources(),
        }
    }
}

impl Settings {
    pub const DEFAULT_PATH: &'static str = "dashboard.yaml";

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DashboardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents, path)
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        match Self::load(path) {
            Err(DashboardError::ConfigRead { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Ok(Settings::default())
            }
            other => other,
        }
    }

    fn from_yaml(contents: &str, path: &Path) -> Result<Self, DashboardError> {
        serde_yaml::from_str(contents).map_err(|source| DashboardError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn catalog(&self) -> TickerCatalog {
        TickerCatalog::new(self.data_dir.clone(), self.tickers.clone())
    }

    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
