//! Application constants for the arrivals processor
//!
//! File names of the persisted store, parser defaults and analytic
//! defaults shared between the library and the CLI.

// =============================================================================
// Parser Defaults
// =============================================================================

/// Number of leading spaces that make up one indentation level
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Separator placed between ancestor names in a series breadcrumb
pub const DEFAULT_PATH_SEPARATOR: &str = " > ";

/// Cell spellings treated as a missing value (exact, case-sensitive match)
pub const DEFAULT_MISSING_TOKENS: &[&str] = &["", "N/A", "NA", "-", "nan"];

/// Month header layout: four-digit year immediately followed by a month name
pub const MONTH_LABEL_PATTERN: &str = r"^(\d{4})([A-Za-z]+)$";

// =============================================================================
// Store Layout
// =============================================================================

/// Parquet file holding the series hierarchy
pub const SERIES_PARQUET: &str = "series_master.parquet";

/// Parquet file holding long-format observations
pub const OBSERVATIONS_PARQUET: &str = "observations.parquet";

/// CSV export of the series hierarchy
pub const SERIES_CSV: &str = "series_master.csv";

/// CSV export of long-format observations
pub const OBSERVATIONS_CSV: &str = "observations_long.csv";

/// Column names shared by both store formats
pub mod columns {
    pub const SERIES_ID: &str = "series_id";
    pub const LEVEL: &str = "level";
    pub const NAME: &str = "name";
    pub const PARENT_ID: &str = "parent_id";
    pub const FULL_PATH: &str = "full_path";
    pub const MONTH: &str = "month";
    pub const DATE: &str = "date";
    pub const VALUE: &str = "value";
}

// =============================================================================
// Analytics Defaults
// =============================================================================

/// Trailing window for the moving average command
pub const DEFAULT_ROLLING_WINDOW: usize = 12;

/// Window and minimum observation count for the seasonality view
pub const SEASONALITY_WINDOW: usize = 12;
pub const SEASONALITY_MIN_PERIODS: usize = 6;

/// Rows shown by the latest-month ranking report
pub const DEFAULT_TOP_LIMIT: usize = 15;

/// Years compared by the rebound report
pub const DEFAULT_REBOUND_BASE_YEAR: i32 = 2019;
pub const DEFAULT_REBOUND_COMPARE_YEAR: i32 = 2025;
