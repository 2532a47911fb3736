//! Arrivals Processor Library
//!
//! Normalizes hierarchical, indentation-encoded monthly arrivals tables into
//! a flat series hierarchy plus long-format observations, persists them as
//! parquet/CSV and runs time-series analytics over the result.
//!
//! This library provides tools for:
//! - Rebuilding the series tree from leading whitespace in a single pass
//! - Reshaping wide month columns into (series_id, month, value) rows
//! - Coercing irregular cells and month headers with counted diagnostics
//! - Writing and reopening a parquet store
//! - Year-on-year change, rolling means, missing rates and summary reports

pub mod analytics;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod reader;
pub mod reports;
pub mod store;

pub use analytics::{ObservationIndex, missing_rate, moving_average, rolling_mean, yoy_change};
pub use config::{ArrivalsConfig, CompressionAlgorithm, OutputConfig, ParserConfig};
pub use error::{ArrivalsError, Result};
pub use models::{Observation, ParseDiagnostics, ParsedDataset, ProcessingStats, SeriesNode};
pub use parser::{DatasetParser, RawTable};
pub use processor::ArrivalsProcessor;
pub use reader::read_wide_csv;
pub use store::{Store, StoreSummary};
