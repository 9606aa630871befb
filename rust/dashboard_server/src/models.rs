// src/models.rs

use serde::{Deserialize, Serialize};
use stock_data::{FilterOptions, FilterSelection};

#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub options: FilterOptions,
    pub default_selection: Option<FilterSelection>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            message: message.into(),
        }
    }
}
