//! Time-series analytics over stored observations.
//!
//! All functions work on an [`ObservationIndex`] keyed by series id and
//! month-start date. Missing values inside found data are ordinary `None`
//! results; caller mistakes (zero window, inverted range) and empty ranges
//! surface as typed errors.

use crate::error::{ArrivalsError, Result};
use crate::models::Observation;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Observations grouped per series and ordered by date
#[derive(Debug, Clone, Default)]
pub struct ObservationIndex {
    by_series: HashMap<u32, BTreeMap<NaiveDate, Option<f64>>>,
}

impl ObservationIndex {
    pub fn from_observations<'a>(observations: impl IntoIterator<Item = &'a Observation>) -> Self {
        let mut by_series: HashMap<u32, BTreeMap<NaiveDate, Option<f64>>> = HashMap::new();
        for observation in observations {
            by_series
                .entry(observation.series_id)
                .or_default()
                .insert(observation.date, observation.value);
        }
        Self { by_series }
    }

    /// `None` when no observation exists; `Some(None)` when it exists but is missing
    pub fn get(&self, series_id: u32, date: NaiveDate) -> Option<Option<f64>> {
        self.by_series
            .get(&series_id)
            .and_then(|values| values.get(&date).copied())
    }

    /// Every observation of a series in date order
    pub fn series_values(&self, series_id: u32) -> Vec<(NaiveDate, Option<f64>)> {
        self.by_series
            .get(&series_id)
            .map(|values| values.iter().map(|(date, value)| (*date, *value)).collect())
            .unwrap_or_default()
    }

    /// Observations of a series with `start <= date <= end`
    pub fn range(&self, series_id: u32, start: NaiveDate, end: NaiveDate) -> Vec<Option<f64>> {
        match self.by_series.get(&series_id) {
            Some(values) if start <= end => {
                values.range(start..=end).map(|(_, value)| *value).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn series_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.by_series.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.by_series.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Percentage change against the same month one year earlier
///
/// `None` when either observation is absent or missing, or when the
/// previous value is zero.
pub fn yoy_change(index: &ObservationIndex, series_id: u32, month: NaiveDate) -> Option<f64> {
    let month = month_start(month);
    let previous_month = NaiveDate::from_ymd_opt(month.year() - 1, month.month(), 1)?;

    let current = index.get(series_id, month).flatten()?;
    let previous = index.get(series_id, previous_month).flatten()?;
    if previous == 0.0 {
        debug!(
            "Series {}: previous value for {} is zero",
            series_id, previous_month
        );
        return None;
    }

    Some((current - previous) / previous * 100.0)
}

/// Trailing mean over a series, in date order
///
/// Each point averages the non-missing values of the last `window`
/// observations and stays undefined until `window` observations have
/// accumulated. An unknown series yields an empty result.
pub fn moving_average(
    index: &ObservationIndex,
    series_id: u32,
    window: usize,
) -> Result<Vec<(NaiveDate, Option<f64>)>> {
    let points = index.series_values(series_id);
    let values: Vec<Option<f64>> = points.iter().map(|(_, value)| *value).collect();
    let means = rolling_mean(&values, window, None)?;

    Ok(points
        .into_iter()
        .map(|(date, _)| date)
        .zip(means)
        .collect())
}

/// Rolling mean kernel
///
/// Without `min_periods` a point needs a full window and at least one
/// non-missing value in it. With `min_periods = m` a point is defined as soon
/// as `m` non-missing values fall inside the trailing window, partial
/// windows included.
pub fn rolling_mean(
    values: &[Option<f64>],
    window: usize,
    min_periods: Option<usize>,
) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(ArrivalsError::invalid_argument("window must be positive"));
    }
    if let Some(min_periods) = min_periods {
        if min_periods > window {
            return Err(ArrivalsError::invalid_argument(format!(
                "min_periods ({}) must not exceed window ({})",
                min_periods, window
            )));
        }
    }

    let means = (0..values.len())
        .map(|end| {
            let start = (end + 1).saturating_sub(window);
            let present: Vec<f64> = values[start..=end].iter().flatten().copied().collect();

            let defined = match min_periods {
                None => end + 1 >= window && !present.is_empty(),
                Some(min_periods) => present.len() >= min_periods.max(1),
            };
            defined.then(|| present.iter().sum::<f64>() / present.len() as f64)
        })
        .collect();

    Ok(means)
}

/// Fraction of missing values among observations in `[start, end]`
pub fn missing_rate(
    index: &ObservationIndex,
    series_id: u32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64> {
    if start > end {
        return Err(ArrivalsError::invalid_argument(format!(
            "start ({}) must not be after end ({})",
            start, end
        )));
    }

    let values = index.range(series_id, start, end);
    if values.is_empty() {
        return Err(ArrivalsError::NoData {
            series_id,
            start,
            end,
        });
    }

    let missing = values.iter().filter(|value| value.is_none()).count();
    Ok(missing as f64 / values.len() as f64)
}
