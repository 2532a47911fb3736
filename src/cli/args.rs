//! Command-line argument definitions for the arrivals processor
//!
//! Defines the CLI with the clap derive API. Month arguments are parsed
//! here so every subcommand accepts the same spellings.

use crate::analytics::month_start;
use crate::config::{ArrivalsConfig, CompressionAlgorithm};
use crate::constants::{
    DEFAULT_INDENT_WIDTH, DEFAULT_PATH_SEPARATOR, DEFAULT_REBOUND_BASE_YEAR,
    DEFAULT_REBOUND_COMPARE_YEAR, DEFAULT_ROLLING_WINDOW, DEFAULT_TOP_LIMIT,
    SEASONALITY_MIN_PERIODS, SEASONALITY_WINDOW,
};
use crate::error::{ArrivalsError, Result};
use crate::parser::MonthLabelResolver;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the arrivals processor
///
/// Converts indentation-encoded monthly arrivals tables into a series
/// hierarchy plus long-format observations, and queries the result.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "arrivals",
    version,
    about = "Normalize hierarchical monthly arrivals CSV files and analyse the result"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse arrivals CSV files into stores
    Process(ProcessArgs),
    /// Year-on-year change for one series and month
    Yoy(YoyArgs),
    /// Trailing rolling mean for one series
    Rolling(RollingArgs),
    /// Fraction of missing values for one series over a date range
    Missing(MissingArgs),
    /// Summary report over a whole store
    Report(ReportArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Input CSV files, directories or glob patterns
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output directory for the store
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: String,

    /// Spaces per indentation level
    #[arg(long, default_value_t = DEFAULT_INDENT_WIDTH)]
    pub indent_width: usize,

    /// Separator used when joining breadcrumb paths
    #[arg(long, default_value = DEFAULT_PATH_SEPARATOR)]
    pub separator: String,

    /// Skip the CSV exports
    #[arg(long, conflicts_with = "no_parquet")]
    pub no_csv: bool,

    /// Skip the parquet tables (the store cannot be reopened for queries)
    #[arg(long)]
    pub no_parquet: bool,

    /// Files processed at once
    #[arg(short = 'j', long = "jobs", default_value_t = 4)]
    pub max_concurrent_files: usize,
}

impl ProcessArgs {
    /// Build the processor configuration from the flags
    pub fn to_config(&self, show_progress: bool) -> Result<ArrivalsConfig> {
        let mut config = ArrivalsConfig::default()
            .with_indent_width(self.indent_width)
            .with_path_separator(self.separator.clone())
            .with_compression(CompressionAlgorithm::from_name(&self.compression)?)
            .with_max_concurrent_files(self.max_concurrent_files);
        if self.no_csv {
            config = config.without_csv();
        }
        if self.no_parquet {
            config = config.without_parquet();
        }
        if !show_progress {
            config = config.without_progress();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Store and series shared by the per-series commands
#[derive(Debug, Clone, Parser)]
pub struct SeriesArgs {
    /// Store directory written by `process`
    #[arg(short = 's', long = "store", value_name = "DIR", default_value = "output")]
    pub store: PathBuf,

    /// Series id from series_master
    #[arg(long = "series", value_name = "ID")]
    pub series_id: u32,
}

#[derive(Debug, Clone, Parser)]
pub struct YoyArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Month to compare (YYYY-MM, YYYY-MM-DD or 2025May)
    #[arg(long, value_parser = month_value)]
    pub month: NaiveDate,
}

#[derive(Debug, Clone, Parser)]
pub struct RollingArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Window size in months
    #[arg(short = 'w', long, default_value_t = DEFAULT_ROLLING_WINDOW)]
    pub window: usize,
}

#[derive(Debug, Clone, Parser)]
pub struct MissingArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// First month of the range
    #[arg(long, value_parser = month_value)]
    pub start: NaiveDate,

    /// Last month of the range
    #[arg(long, value_parser = month_value)]
    pub end: NaiveDate,
}

/// Reports available from `report`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Largest values at the latest month
    Top,
    /// Monthly totals per series at a level
    Monthly,
    /// Yearly totals per series at a level
    Yearly,
    /// Missing-value rate per series
    Missing,
    /// Recovery of one year against another
    Rebound,
    /// Rolling mean per series
    Seasonality,
}

#[derive(Debug, Clone, Parser)]
pub struct ReportArgs {
    /// Report to produce
    #[arg(value_enum)]
    pub kind: ReportKind,

    /// Store directory written by `process`
    #[arg(short = 's', long = "store", value_name = "DIR", default_value = "output")]
    pub store: PathBuf,

    /// Rows shown by the top report
    #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
    pub limit: usize,

    /// Hierarchy level for the monthly and yearly reports
    #[arg(long, default_value_t = 0)]
    pub level: u32,

    #[arg(long, default_value_t = DEFAULT_REBOUND_BASE_YEAR)]
    pub base_year: i32,

    #[arg(long, default_value_t = DEFAULT_REBOUND_COMPARE_YEAR)]
    pub compare_year: i32,

    /// Rolling window for the seasonality report
    #[arg(long, default_value_t = SEASONALITY_WINDOW)]
    pub window: usize,

    /// Minimum non-missing values per window for the seasonality report
    #[arg(long, default_value_t = SEASONALITY_MIN_PERIODS)]
    pub min_periods: usize,

    /// Also write the report to this CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

fn month_value(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_month_arg(value).map_err(|e| e.to_string())
}

/// Parse a month argument to its month-start date
///
/// Accepts `YYYY-MM`, `YYYY-MM-DD` (any day of the month) and column
/// header labels such as `2025May` or `2025August`.
pub fn parse_month_arg(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(month_start(date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d") {
        return Ok(date);
    }
    if let Some(date) = MonthLabelResolver::new().resolve(value) {
        return Ok(date);
    }

    Err(ArrivalsError::invalid_argument(format!(
        "'{}' is not a month (expected YYYY-MM, YYYY-MM-DD or e.g. 2025May)",
        value
    )))
}
