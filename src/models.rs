//! Core data structures for arrivals processing.
//!
//! Defines the series hierarchy record, the long-format observation, the
//! parser's output bundle with its diagnostics, and run statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One row of the series hierarchy (`series_master`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesNode {
    /// Surrogate id, assigned in row order starting at 1
    pub series_id: u32,
    /// Nesting depth inferred from indentation (0 = root)
    pub level: u32,
    /// Label with indentation and surrounding whitespace removed
    pub name: String,
    /// Nearest preceding node at `level - 1`, if one was established
    pub parent_id: Option<u32>,
    /// Breadcrumb from the root ancestor to this node
    pub full_path: String,
}

/// One (series, month) data point (`observations_long`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub series_id: u32,
    /// Original month header, e.g. `2025May`
    pub month: String,
    /// First day of the resolved month
    pub date: NaiveDate,
    /// `None` marks a missing value
    pub value: Option<f64>,
}

/// Counts of everything the parser silently skipped or coerced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    pub rows_read: usize,
    pub blank_rows_skipped: usize,
    pub series_created: usize,
    /// Nodes with `level > 0` for which no parent was established
    pub orphan_nodes: usize,
    pub unresolved_months: Vec<String>,
    pub duplicate_months: Vec<String>,
    /// Cells matching a missing-value token
    pub missing_cells: usize,
    /// Cells that were neither a token nor a finite number
    pub unparseable_cells: usize,
    pub observations_emitted: usize,
}

impl ParseDiagnostics {
    /// Total cells that ended up as missing values
    pub fn missing_values(&self) -> usize {
        self.missing_cells + self.unparseable_cells
    }

    /// Fold another file's diagnostics into this one
    pub fn merge(&mut self, other: &ParseDiagnostics) {
        self.rows_read += other.rows_read;
        self.blank_rows_skipped += other.blank_rows_skipped;
        self.series_created += other.series_created;
        self.orphan_nodes += other.orphan_nodes;
        self.unresolved_months
            .extend(other.unresolved_months.iter().cloned());
        self.duplicate_months
            .extend(other.duplicate_months.iter().cloned());
        self.missing_cells += other.missing_cells;
        self.unparseable_cells += other.unparseable_cells;
        self.observations_emitted += other.observations_emitted;
    }
}

/// Output of one parse run: both tables plus diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDataset {
    /// Series in insertion order
    pub series: Vec<SeriesNode>,
    /// Observations in row-major, then column order
    pub observations: Vec<Observation>,
    pub diagnostics: ParseDiagnostics,
}

impl ParsedDataset {
    /// True when no series were produced
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Processing statistics for a whole run
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub series_written: usize,
    pub observations_written: usize,
    pub diagnostics: ParseDiagnostics,
    pub output_paths: Vec<PathBuf>,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_merge() {
        let mut total = ParseDiagnostics {
            rows_read: 3,
            missing_cells: 1,
            unresolved_months: vec!["2025Foo".to_string()],
            ..Default::default()
        };
        let other = ParseDiagnostics {
            rows_read: 2,
            unparseable_cells: 4,
            unresolved_months: vec!["Notes".to_string()],
            ..Default::default()
        };

        total.merge(&other);

        assert_eq!(total.rows_read, 5);
        assert_eq!(total.missing_values(), 5);
        assert_eq!(total.unresolved_months, vec!["2025Foo", "Notes"]);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(ParsedDataset::default().is_empty());
    }
}
