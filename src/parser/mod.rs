//! Hierarchy parser for wide, indentation-encoded monthly tables.
//!
//! A single sequential pass over the rows rebuilds the series tree from
//! leading whitespace and reshapes every month column into long-format
//! observations. Data anomalies never abort a parse: blank labels skip the
//! row, unresolved month headers drop the column, and unusable cells become
//! missing values. Every such decision is counted in [`ParseDiagnostics`].

pub mod hierarchy;
pub mod indent;
pub mod months;
pub mod values;

#[cfg(test)]
pub mod tests;

pub use self::hierarchy::HierarchyBuilder;
pub use self::indent::{ClassifiedLabel, IndentClassifier};
pub use self::months::MonthLabelResolver;
pub use self::values::{CellValue, ValueCoercer};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::models::{Observation, ParseDiagnostics, ParsedDataset};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Raw wide table: column 0 holds labels, columns 1.. hold month values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Convenience constructor from string slices
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A month column that resolved to a date
#[derive(Debug, Clone)]
struct MonthColumn {
    index: usize,
    label: String,
    date: NaiveDate,
}

/// Drives one pass over a [`RawTable`]
#[derive(Debug, Clone)]
pub struct DatasetParser {
    classifier: IndentClassifier,
    coercer: ValueCoercer,
    resolver: MonthLabelResolver,
    separator: String,
}

impl DatasetParser {
    pub fn new(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            classifier: IndentClassifier::new(config.indent_width),
            coercer: ValueCoercer::new(config.missing_tokens.as_slice()),
            resolver: MonthLabelResolver::new(),
            separator: config.path_separator.clone(),
        })
    }

    /// Parse a table into the series hierarchy and long observations
    ///
    /// Each call uses a fresh [`HierarchyBuilder`], so the parser can be
    /// reused and parses stay independent.
    pub fn parse(&self, table: &RawTable) -> ParsedDataset {
        let mut diagnostics = ParseDiagnostics::default();
        let columns = self.resolve_columns(&table.headers, &mut diagnostics);

        let mut builder = HierarchyBuilder::new(self.separator.as_str());
        let mut series = Vec::new();
        let mut observations = Vec::with_capacity(table.rows.len() * columns.len());

        for (row_index, row) in table.rows.iter().enumerate() {
            diagnostics.rows_read += 1;

            let raw_label = row.first().map(String::as_str).unwrap_or("");
            let label = self.classifier.classify(raw_label);
            if label.is_blank() {
                debug!("Skipping blank row {}", row_index + 1);
                diagnostics.blank_rows_skipped += 1;
                continue;
            }

            let node = builder.push(label.level, label.name);
            if node.level > 0 && node.parent_id.is_none() {
                diagnostics.orphan_nodes += 1;
            }

            for column in &columns {
                let raw_cell = row.get(column.index).map(String::as_str).unwrap_or("");
                let cell = self.coercer.classify(raw_cell);
                match cell {
                    CellValue::MissingToken => diagnostics.missing_cells += 1,
                    CellValue::Unparseable => {
                        debug!(
                            "Series {} month {}: unparseable value {:?}",
                            node.series_id, column.label, raw_cell
                        );
                        diagnostics.unparseable_cells += 1;
                    }
                    CellValue::Number(_) => {}
                }

                observations.push(Observation {
                    series_id: node.series_id,
                    month: column.label.clone(),
                    date: column.date,
                    value: cell.value(),
                });
            }

            series.push(node);
        }

        diagnostics.series_created = series.len();
        diagnostics.observations_emitted = observations.len();

        info!(
            "Parsed {} series and {} observations from {} rows ({} month columns)",
            series.len(),
            observations.len(),
            diagnostics.rows_read,
            columns.len()
        );

        ParsedDataset {
            series,
            observations,
            diagnostics,
        }
    }

    /// Resolve every month header once; later duplicates of a month are dropped
    fn resolve_columns(
        &self,
        headers: &[String],
        diagnostics: &mut ParseDiagnostics,
    ) -> Vec<MonthColumn> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for (index, header) in headers.iter().enumerate().skip(1) {
            let Some(date) = self.resolver.resolve(header) else {
                warn!("Dropping column '{}': not a recognised month label", header);
                diagnostics.unresolved_months.push(header.clone());
                continue;
            };

            if !seen.insert(date) {
                warn!(
                    "Dropping column '{}': month {} already present",
                    header,
                    date.format("%Y-%m")
                );
                diagnostics.duplicate_months.push(header.clone());
                continue;
            }

            columns.push(MonthColumn {
                index,
                label: header.clone(),
                date,
            });
        }

        columns
    }
}
