//! Persisted series/observation store.
//!
//! A store is a directory holding the parser's two tables as parquet
//! (`series_master.parquet`, `observations.parquet`) and, optionally, CSV
//! exports. Observations are written sorted by `(series_id, date)`, the
//! access order every analytic query uses.

pub mod frames;

use self::frames::{
    observations_from_frame, observations_to_frame, series_from_frame, series_to_frame,
};
use crate::analytics::ObservationIndex;
use crate::config::OutputConfig;
use crate::constants::{OBSERVATIONS_CSV, OBSERVATIONS_PARQUET, SERIES_CSV, SERIES_PARQUET};
use crate::error::{ArrivalsError, Result};
use crate::models::{Observation, ParsedDataset, SeriesNode};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a store write produced
#[derive(Debug, Clone, Default)]
pub struct StoreSummary {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub series_rows: usize,
    pub observation_rows: usize,
}

/// Loaded store contents
#[derive(Debug, Clone, Default)]
pub struct Store {
    root: Option<PathBuf>,
    series: Vec<SeriesNode>,
    observations: Vec<Observation>,
}

impl Store {
    /// Build an in-memory store from parsed tables
    pub fn from_parts(series: Vec<SeriesNode>, mut observations: Vec<Observation>) -> Self {
        observations.sort_by(|a, b| (a.series_id, a.date).cmp(&(b.series_id, b.date)));
        Self {
            root: None,
            series,
            observations,
        }
    }

    /// Persist a parsed dataset into `dir`
    pub fn write(dir: &Path, dataset: &ParsedDataset, output: &OutputConfig) -> Result<StoreSummary> {
        fs::create_dir_all(dir)?;

        let mut observations = dataset.observations.clone();
        observations.sort_by(|a, b| (a.series_id, a.date).cmp(&(b.series_id, b.date)));

        let mut series_df = series_to_frame(&dataset.series)?;
        let mut observations_df = observations_to_frame(&observations)?;

        let mut files = Vec::new();
        if output.write_parquet {
            let compression = output.compression.to_polars_compression();
            files.push(write_parquet(&mut series_df, &dir.join(SERIES_PARQUET), compression)?);
            files.push(write_parquet(
                &mut observations_df,
                &dir.join(OBSERVATIONS_PARQUET),
                compression,
            )?);
        }
        if output.write_csv {
            files.push(write_csv(&mut series_df, &dir.join(SERIES_CSV))?);
            files.push(write_csv(&mut observations_df, &dir.join(OBSERVATIONS_CSV))?);
        }

        info!(
            "Wrote {} series and {} observations to {}",
            series_df.height(),
            observations_df.height(),
            dir.display()
        );

        Ok(StoreSummary {
            root: dir.to_path_buf(),
            files,
            series_rows: series_df.height(),
            observation_rows: observations_df.height(),
        })
    }

    /// Load a store previously written with parquet enabled
    pub fn open(dir: &Path) -> Result<Self> {
        let series_path = dir.join(SERIES_PARQUET);
        let observations_path = dir.join(OBSERVATIONS_PARQUET);
        if !series_path.is_file() || !observations_path.is_file() {
            return Err(ArrivalsError::StoreNotFound {
                path: dir.to_path_buf(),
            });
        }

        let series_df = ParquetReader::new(File::open(&series_path)?).finish()?;
        let observations_df = ParquetReader::new(File::open(&observations_path)?).finish()?;

        let series = series_from_frame(&series_df, &series_path)?;
        let observations = observations_from_frame(&observations_df, &observations_path)?;
        debug!(
            "Opened store {}: {} series, {} observations",
            dir.display(),
            series.len(),
            observations.len()
        );

        Ok(Self {
            root: Some(dir.to_path_buf()),
            ..Self::from_parts(series, observations)
        })
    }

    /// Directory the store was loaded from, if any
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn series(&self) -> &[SeriesNode] {
        &self.series
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn find_series(&self, series_id: u32) -> Option<&SeriesNode> {
        self.series.iter().find(|s| s.series_id == series_id)
    }

    /// Index observations by (series_id, date) for the analytic functions
    pub fn observation_index(&self) -> ObservationIndex {
        ObservationIndex::from_observations(&self.observations)
    }

    pub fn series_frame(&self) -> Result<LazyFrame> {
        Ok(series_to_frame(&self.series)?.lazy())
    }

    pub fn observations_frame(&self) -> Result<LazyFrame> {
        Ok(observations_to_frame(&self.observations)?.lazy())
    }
}

fn write_parquet(df: &mut DataFrame, path: &Path, compression: ParquetCompression) -> Result<PathBuf> {
    let file = File::create(path)?;
    ParquetWriter::new(file)
        .with_compression(compression)
        .finish(df)
        .map_err(|e| ArrivalsError::ProcessingFailed {
            path: path.to_path_buf(),
            reason: format!("Failed to write parquet: {}", e),
        })?;
    debug!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

/// Write a frame as CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| ArrivalsError::ProcessingFailed {
            path: path.to_path_buf(),
            reason: format!("Failed to write csv: {}", e),
        })?;
    debug!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}
