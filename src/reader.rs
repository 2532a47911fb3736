//! Wide CSV input reading.
//!
//! Loads the source file into a [`RawTable`] without touching cell
//! content: leading whitespace in the label column carries the hierarchy,
//! so nothing is trimmed here.

use crate::error::{ArrivalsError, Result};
use crate::parser::RawTable;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a wide CSV file from disk
pub fn read_wide_csv(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(ArrivalsError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = csv_reader().from_path(path)?;
    let table = collect_table(reader).map_err(|e| ArrivalsError::InvalidFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(
        "Read {} rows x {} columns from {}",
        table.row_count(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Read a wide CSV from any reader
pub fn read_wide_csv_from<R: Read>(input: R) -> Result<RawTable> {
    Ok(collect_table(csv_reader().from_reader(input))?)
}

fn csv_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None);
    builder
}

/// Pad short rows and truncate long ones to the header width
fn collect_table<R: Read>(mut reader: csv::Reader<R>) -> std::result::Result<RawTable, csv::Error> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_string())
        .collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(RawTable::new(headers, rows))
}
