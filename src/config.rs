//! Configuration management and validation.
//!
//! Provides configuration structures for the hierarchy parser, the
//! persisted store and the file processor, with builder-style overrides
//! and validation rules.

use crate::constants::{DEFAULT_INDENT_WIDTH, DEFAULT_MISSING_TOKENS, DEFAULT_PATH_SEPARATOR};
use crate::error::{ArrivalsError, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }

    /// Parse a CLI compression name
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            "lz4" => Ok(Self::Lz4),
            "none" | "uncompressed" => Ok(Self::Uncompressed),
            other => Err(ArrivalsError::configuration(format!(
                "Unknown compression algorithm '{}' (expected snappy, zstd, lz4 or none)",
                other
            ))),
        }
    }
}

/// Settings for the hierarchy parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Leading spaces per indentation level (tabs always count as one level)
    pub indent_width: usize,

    /// Separator between names in `full_path`
    pub path_separator: String,

    /// Cell spellings coerced to missing before numeric parsing
    pub missing_tokens: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            missing_tokens: DEFAULT_MISSING_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
        }
    }
}

/// Settings for the persisted store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the queryable parquet pair
    pub write_parquet: bool,

    /// Write `series_master.csv` and `observations_long.csv`
    pub write_csv: bool,

    /// Parquet compression
    pub compression: CompressionAlgorithm,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_parquet: true,
            write_csv: true,
            compression: CompressionAlgorithm::Snappy,
        }
    }
}

/// Global configuration for arrivals processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalsConfig {
    /// Parser settings
    pub parser: ParserConfig,

    /// Store output settings
    pub output: OutputConfig,

    /// Maximum input files parsed concurrently (each parse is single-threaded)
    pub max_concurrent_files: usize,

    /// Show a progress bar while processing several files
    pub show_progress: bool,
}

impl Default for ArrivalsConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            output: OutputConfig::default(),
            max_concurrent_files: 4,
            show_progress: true,
        }
    }
}

impl ArrivalsConfig {
    /// Set spaces per indentation level
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.parser.indent_width = indent_width;
        self
    }

    /// Set the breadcrumb separator
    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.parser.path_separator = separator.into();
        self
    }

    /// Replace the missing-value token set
    pub fn with_missing_tokens(mut self, tokens: Vec<String>) -> Self {
        self.parser.missing_tokens = tokens;
        self
    }

    /// Set parquet compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.output.compression = compression;
        self
    }

    /// Disable the CSV exports
    pub fn without_csv(mut self) -> Self {
        self.output.write_csv = false;
        self
    }

    /// Disable the parquet store
    pub fn without_parquet(mut self) -> Self {
        self.output.write_parquet = false;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Hide the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the configuration for values the processor cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.parser.indent_width == 0 {
            return Err(ArrivalsError::configuration(
                "indent_width must be at least 1",
            ));
        }
        if self.parser.path_separator.is_empty() {
            return Err(ArrivalsError::configuration(
                "path_separator must not be empty",
            ));
        }
        if !self.output.write_parquet && !self.output.write_csv {
            return Err(ArrivalsError::configuration(
                "at least one of parquet or csv output must be enabled",
            ));
        }
        if self.max_concurrent_files == 0 {
            return Err(ArrivalsError::configuration(
                "max_concurrent_files must be at least 1",
            ));
        }

        debug!(
            "Configuration valid: indent_width={}, separator={:?}, {} missing tokens",
            self.parser.indent_width,
            self.parser.path_separator,
            self.parser.missing_tokens.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ArrivalsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.parser.indent_width, 4);
        assert_eq!(config.parser.path_separator, " > ");
        assert_eq!(
            config.parser.missing_tokens,
            vec!["", "N/A", "NA", "-", "nan"]
        );
    }

    #[test]
    fn test_zero_indent_width_rejected() {
        let config = ArrivalsConfig::default().with_indent_width(0);
        assert!(matches!(
            config.validate(),
            Err(ArrivalsError::Configuration { .. })
        ));
    }

    #[test]
    fn test_no_output_format_rejected() {
        let config = ArrivalsConfig::default().without_csv().without_parquet();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = ArrivalsConfig::default().with_max_concurrent_files(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_compression_names() {
        assert_eq!(
            CompressionAlgorithm::from_name("ZSTD").unwrap(),
            CompressionAlgorithm::Zstd
        );
        assert_eq!(
            CompressionAlgorithm::from_name("none").unwrap(),
            CompressionAlgorithm::Uncompressed
        );
        assert!(CompressionAlgorithm::from_name("brotli").is_err());
    }
}
