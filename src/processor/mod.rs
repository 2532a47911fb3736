//! Processing engine for arrivals CSV files.
//!
//! Resolves the inputs, parses each file on the blocking pool with its own
//! parser instance and writes one store per file.

pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;

use crate::config::ArrivalsConfig;
use crate::error::{ArrivalsError, Result};
use crate::models::{ParseDiagnostics, ProcessingStats};
use crate::parser::DatasetParser;
use crate::reader::read_wide_csv;
use crate::store::{Store, StoreSummary};

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info};

/// Result of converting one input file
#[derive(Debug)]
struct FileOutcome {
    diagnostics: ParseDiagnostics,
    summary: StoreSummary,
}

/// Main processor for arrivals CSV conversion
#[derive(Debug)]
pub struct ArrivalsProcessor {
    files: Vec<PathBuf>,
    store_dirs: Vec<PathBuf>,
    output_dir: PathBuf,
    config: ArrivalsConfig,
}

impl ArrivalsProcessor {
    /// Create a processor for the given inputs (files, directories or globs)
    pub fn new<S: Into<String>>(
        inputs: impl IntoIterator<Item = S>,
        output_dir: PathBuf,
    ) -> Result<Self> {
        let files = FileDiscovery::new(inputs).discover()?;
        let store_dirs = assign_store_dirs(&files, &output_dir);

        Ok(Self {
            files,
            store_dirs,
            output_dir,
            config: ArrivalsConfig::default(),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ArrivalsConfig) -> Self {
        self.config = config;
        self
    }

    /// Files that will be processed
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingStats> {
        self.config.validate()?;

        let start_time = Instant::now();
        println!("{}", "Starting arrivals processing".bright_green().bold());
        println!(
            "  {} {} file(s)",
            "Inputs:".bright_cyan(),
            self.files.len().to_string().bright_white().bold()
        );
        println!("  {} {}", "Output:".bright_cyan(), self.output_dir.display());

        let pb = if self.config.show_progress && self.files.len() > 1 {
            let pb = ProgressBar::new(self.files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let concurrent_limit = self.config.max_concurrent_files.min(self.files.len()).max(1);
        debug!("Processing with concurrency {}", concurrent_limit);

        let jobs = self.files.iter().cloned().zip(self.store_dirs.iter().cloned());
        let results = stream::iter(jobs)
            .map(|(file_path, store_dir)| {
                let config = self.config.clone();
                let pb = pb.clone();
                async move {
                    if let Some(file_name) = file_path.file_name() {
                        pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                    }

                    let task_path = file_path.clone();
                    let result =
                        task::spawn_blocking(move || process_file(&task_path, &store_dir, &config))
                            .await
                            .unwrap_or_else(|e| {
                                Err(ArrivalsError::ProcessingFailed {
                                    path: file_path.clone(),
                                    reason: format!("worker task failed: {}", e),
                                })
                            });
                    pb.inc(1);

                    if let Err(e) = &result {
                        error!("Failed to process {}: {:#}", file_path.display(), e);
                    }
                    result
                }
            })
            .buffer_unordered(concurrent_limit)
            .collect::<Vec<_>>()
            .await;

        pb.finish_and_clear();

        let mut stats = ProcessingStats::default();
        for result in results {
            match result {
                Ok(outcome) => {
                    stats.files_processed += 1;
                    stats.series_written += outcome.summary.series_rows;
                    stats.observations_written += outcome.summary.observation_rows;
                    stats.diagnostics.merge(&outcome.diagnostics);
                    stats.output_paths.push(outcome.summary.root);
                }
                Err(_) => stats.files_failed += 1,
            }
        }
        stats.output_paths.sort();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        print_summary(&stats);
        Ok(stats)
    }
}

/// Pick a distinct store directory for every input
///
/// A single input writes straight into the output directory. Several
/// inputs each get a sub-directory named after the file stem; stems shared
/// by more than one input are prefixed with the parent directory name, and
/// any name still taken gets a numeric suffix.
fn assign_store_dirs(files: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    if files.len() == 1 {
        return vec![output_dir.to_path_buf()];
    }

    let stem_of = |file: &Path| {
        file.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "arrivals".to_string())
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for file in files {
        *stem_counts.entry(stem_of(file)).or_default() += 1;
    }

    let mut taken = HashSet::new();
    files
        .iter()
        .map(|file| {
            let stem = stem_of(file);
            let base = match file.parent().and_then(|parent| parent.file_name()) {
                Some(parent) if stem_counts[&stem] > 1 => {
                    format!("{}_{}", parent.to_string_lossy(), stem)
                }
                _ => stem,
            };

            let mut name = base.clone();
            let mut suffix = 2;
            while !taken.insert(name.clone()) {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            if name != base {
                debug!("{}: store renamed to {}", file.display(), name);
            }
            output_dir.join(name)
        })
        .collect()
}

/// Read, parse and persist a single file
fn process_file(path: &Path, store_dir: &Path, config: &ArrivalsConfig) -> Result<FileOutcome> {
    let table = read_wide_csv(path)?;
    let parser = DatasetParser::new(&config.parser)?;
    let dataset = parser.parse(&table);

    if dataset.is_empty() {
        info!("{}: no series found", path.display());
    }

    let summary = Store::write(store_dir, &dataset, &config.output)?;
    Ok(FileOutcome {
        diagnostics: dataset.diagnostics,
        summary,
    })
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Series:".bright_cyan(),
        stats.series_written.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Observations:".bright_cyan(),
        stats.observations_written.to_string().bright_white().bold()
    );

    let diagnostics = &stats.diagnostics;
    if diagnostics.blank_rows_skipped > 0 {
        println!(
            "  {} {}",
            "Blank rows skipped:".bright_yellow(),
            diagnostics.blank_rows_skipped
        );
    }
    if diagnostics.orphan_nodes > 0 {
        println!(
            "  {} {}",
            "Series without parent:".bright_yellow(),
            diagnostics.orphan_nodes
        );
    }
    if !diagnostics.unresolved_months.is_empty() {
        println!(
            "  {} {}",
            "Dropped columns:".bright_yellow(),
            diagnostics.unresolved_months.join(", ")
        );
    }
    if !diagnostics.duplicate_months.is_empty() {
        println!(
            "  {} {}",
            "Duplicate months:".bright_yellow(),
            diagnostics.duplicate_months.join(", ")
        );
    }
    println!(
        "  {} {}",
        "Missing values:".bright_cyan(),
        diagnostics.missing_values().to_string().bright_white()
    );
}
