//! Conversion between typed records and polars frames.
//!
//! The store keeps typed records in memory; these helpers give them a
//! polars shape for writing and reporting, and rebuild them from frames
//! read back from parquet.

use crate::constants::columns::{
    DATE, FULL_PATH, LEVEL, MONTH, NAME, PARENT_ID, SERIES_ID, VALUE,
};
use crate::error::{ArrivalsError, Result};
use crate::models::{Observation, SeriesNode};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::path::Path;

/// Days from 0001-01-01 to the Unix epoch
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + EPOCH_DAYS_FROM_CE)
}

/// A polars `Date` column from calendar dates
pub fn dates_to_column(name: &str, dates: &[NaiveDate]) -> PolarsResult<Column> {
    let days: Vec<i32> = dates.iter().map(|date| date_to_days(*date)).collect();
    Column::new(name.into(), days).cast(&DataType::Date)
}

/// Build the `series_master` frame
pub fn series_to_frame(series: &[SeriesNode]) -> PolarsResult<DataFrame> {
    let ids: Vec<u32> = series.iter().map(|s| s.series_id).collect();
    let levels: Vec<u32> = series.iter().map(|s| s.level).collect();
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    let parents: Vec<Option<u32>> = series.iter().map(|s| s.parent_id).collect();
    let paths: Vec<&str> = series.iter().map(|s| s.full_path.as_str()).collect();

    DataFrame::new(vec![
        Column::new(SERIES_ID.into(), ids),
        Column::new(LEVEL.into(), levels),
        Column::new(NAME.into(), names),
        Column::new(PARENT_ID.into(), parents),
        Column::new(FULL_PATH.into(), paths),
    ])
}

/// Build the `observations_long` frame with a polars `Date` column
pub fn observations_to_frame(observations: &[Observation]) -> PolarsResult<DataFrame> {
    let ids: Vec<u32> = observations.iter().map(|o| o.series_id).collect();
    let months: Vec<&str> = observations.iter().map(|o| o.month.as_str()).collect();
    let dates: Vec<NaiveDate> = observations.iter().map(|o| o.date).collect();
    let values: Vec<Option<f64>> = observations.iter().map(|o| o.value).collect();

    DataFrame::new(vec![
        Column::new(SERIES_ID.into(), ids),
        Column::new(MONTH.into(), months),
        dates_to_column(DATE, &dates)?,
        Column::new(VALUE.into(), values),
    ])
}

/// Fetch a column as a series of the requested type
fn typed(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Series> {
    Ok(df.column(name)?.as_materialized_series().cast(dtype)?)
}

fn invalid(path: &Path, reason: impl Into<String>) -> ArrivalsError {
    ArrivalsError::InvalidFormat {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Rebuild series records from a `series_master` frame
pub fn series_from_frame(df: &DataFrame, source: &Path) -> Result<Vec<SeriesNode>> {
    let ids = typed(df, SERIES_ID, &DataType::UInt32)?;
    let levels = typed(df, LEVEL, &DataType::UInt32)?;
    let names = typed(df, NAME, &DataType::String)?;
    let parents = typed(df, PARENT_ID, &DataType::UInt32)?;
    let paths = typed(df, FULL_PATH, &DataType::String)?;

    let mut series = Vec::with_capacity(df.height());
    for ((((id, level), name), parent_id), full_path) in ids
        .u32()?
        .into_iter()
        .zip(levels.u32()?.into_iter())
        .zip(names.str()?.into_iter())
        .zip(parents.u32()?.into_iter())
        .zip(paths.str()?.into_iter())
    {
        let (Some(series_id), Some(level)) = (id, level) else {
            return Err(invalid(source, "series row without id or level"));
        };
        series.push(SeriesNode {
            series_id,
            level,
            name: name.unwrap_or_default().to_string(),
            parent_id,
            full_path: full_path.unwrap_or_default().to_string(),
        });
    }
    Ok(series)
}

/// Rebuild observation records from an `observations_long` frame
pub fn observations_from_frame(df: &DataFrame, source: &Path) -> Result<Vec<Observation>> {
    let ids = typed(df, SERIES_ID, &DataType::UInt32)?;
    let months = typed(df, MONTH, &DataType::String)?;
    let days = typed(df, DATE, &DataType::Int32)?;
    let values = typed(df, VALUE, &DataType::Float64)?;

    let mut observations = Vec::with_capacity(df.height());
    for (((id, month), day), value) in ids
        .u32()?
        .into_iter()
        .zip(months.str()?.into_iter())
        .zip(days.i32()?.into_iter())
        .zip(values.f64()?.into_iter())
    {
        let series_id = id.ok_or_else(|| invalid(source, "observation without series id"))?;
        let date = day
            .and_then(days_to_date)
            .ok_or_else(|| invalid(source, format!("series {} has an invalid date", series_id)))?;
        observations.push(Observation {
            series_id,
            month: month.unwrap_or_default().to_string(),
            date,
            value,
        });
    }
    Ok(observations)
}
