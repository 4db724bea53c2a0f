use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the api, config and calendar layers.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("API request failed: {0}")]
    Api(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No profile set for {0}")]
    ProfileNotSet(&'static str),
}

pub type Result<T> = StdResult<T, BudgetError>;
