//! Error handling for arrivals processing operations.
//!
//! Parse-time data anomalies never surface here: blank labels, unresolved
//! month headers and non-numeric cells degrade to skipped rows or missing
//! values. These variants cover I/O, storage, configuration and the caller
//! errors raised by the analytic functions.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArrivalsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Invalid input format in file: {path} - {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("No store found at path: {path}")]
    StoreNotFound { path: PathBuf },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("No observations for series {series_id} between {start} and {end}")]
    NoData {
        series_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl ArrivalsError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArrivalsError>;
