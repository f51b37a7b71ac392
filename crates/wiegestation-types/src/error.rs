//! Error types for wiegestation

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Rejected operator input; raised before the store is touched
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("No license plate given")]
    MissingPlate,

    #[error("Weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown cargo type: {0}")]
    InvalidCargoType(String),

    #[error("No entry with id {0}")]
    EntryNotFound(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
