//! Input discovery for the arrivals processor
//!
//! Resolves the user's inputs into a list of CSV files. Each input may be
//! a file, a directory (every `*.csv` directly inside it) or a glob pattern.

use crate::error::{ArrivalsError, Result};
use glob::glob;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolves input arguments to concrete CSV files
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    inputs: Vec<String>,
}

impl FileDiscovery {
    pub fn new<S: Into<String>>(inputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Discover every input file, in input order without duplicates
    ///
    /// An input that matches nothing fails the whole discovery with
    /// `InputNotFound`.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if self.inputs.is_empty() {
            return Err(ArrivalsError::configuration("no input files given"));
        }

        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for input in &self.inputs {
            let matched = resolve_input(input)?;
            if matched.is_empty() {
                return Err(ArrivalsError::InputNotFound {
                    path: PathBuf::from(input),
                });
            }

            debug!("Input '{}' matched {} file(s)", input, matched.len());
            for path in matched {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        Ok(files)
    }
}

fn resolve_input(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let pattern = if path.is_dir() {
        format!("{}/*.csv", input.trim_end_matches('/'))
    } else {
        input.to_string()
    };

    let entries = glob(&pattern).map_err(|e| {
        ArrivalsError::configuration(format!("invalid input pattern '{}': {}", input, e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if is_csv_file(&path) => files.push(path),
            Ok(path) => debug!("Skipping non-CSV match: {}", path.display()),
            Err(e) => warn!("Cannot read glob entry: {}", e),
        }
    }
    Ok(files)
}

/// Check if a path is a CSV file
fn is_csv_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
