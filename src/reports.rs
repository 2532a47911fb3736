//! Summary reports over a loaded store.
//!
//! Each report is a polars lazy query over the store's two tables, collected
//! into a [`DataFrame`] that the CLI prints or exports.

use crate::analytics::rolling_mean;
use crate::constants::columns::{DATE, FULL_PATH, LEVEL, NAME, SERIES_ID, VALUE};
use crate::error::{ArrivalsError, Result};
use crate::store::Store;
use crate::store::frames::dates_to_column;
use polars::prelude::*;
use tracing::debug;

const YEAR: &str = "year";
const MISSING_RATE: &str = "missing_rate";
const ROLLING_MEAN: &str = "rolling_mean";

/// Observations joined with their series metadata
fn joined(store: &Store) -> Result<LazyFrame> {
    Ok(store.observations_frame()?.join(
        store.series_frame()?,
        [col(SERIES_ID)],
        [col(SERIES_ID)],
        JoinArgs::new(JoinType::Inner),
    ))
}

/// The `n` largest values at the most recent month, nulls last
pub fn top_latest(store: &Store, n: usize) -> Result<DataFrame> {
    let df = joined(store)?
        .filter(col(DATE).eq(col(DATE).max()))
        .select([col(DATE), col(FULL_PATH), col(VALUE)])
        .sort_by_exprs(
            [col(VALUE)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true),
        )
        .limit(n as IdxSize)
        .collect()?;

    debug!("top_latest: {} rows", df.height());
    Ok(df)
}

/// Monthly sums per series name at one hierarchy level
pub fn level_totals(store: &Store, level: u32) -> Result<DataFrame> {
    let df = joined(store)?
        .filter(col(LEVEL).eq(lit(level)))
        .group_by([col(DATE), col(NAME)])
        .agg([col(VALUE).sum().alias(VALUE)])
        .sort_by_exprs([col(DATE), col(NAME)], SortMultipleOptions::default())
        .collect()?;

    Ok(df)
}

/// Calendar-year sums per series name at one hierarchy level
pub fn yearly_totals(store: &Store, level: u32) -> Result<DataFrame> {
    let df = joined(store)?
        .filter(col(LEVEL).eq(lit(level)))
        .with_column(col(DATE).dt().year().alias(YEAR))
        .group_by([col(NAME), col(YEAR)])
        .agg([col(VALUE).sum().alias(VALUE)])
        .sort_by_exprs([col(NAME), col(YEAR)], SortMultipleOptions::default())
        .collect()?;

    Ok(df)
}

/// Fraction of missing values per series, worst first
pub fn missing_by_series(store: &Store) -> Result<DataFrame> {
    let df = joined(store)?
        .group_by([col(FULL_PATH)])
        .agg([col(VALUE)
            .is_null()
            .cast(DataType::Float64)
            .mean()
            .alias(MISSING_RATE)])
        .sort_by_exprs(
            [col(MISSING_RATE), col(FULL_PATH)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;

    Ok(df)
}

/// Yearly totals for two years per series and the percentage recovery
///
/// The percentage is null when the base-year total is zero.
pub fn rebound(store: &Store, base_year: i32, compare_year: i32) -> Result<DataFrame> {
    let base = format!("total_{}", base_year);
    let compare = format!("total_{}", compare_year);
    let pct = format!("pct_{}_vs_{}", compare_year, base_year);

    let df = joined(store)?
        .with_column(col(DATE).dt().year().alias(YEAR))
        .group_by([col(FULL_PATH)])
        .agg([
            col(VALUE)
                .filter(col(YEAR).eq(lit(base_year)))
                .sum()
                .alias(base.as_str()),
            col(VALUE)
                .filter(col(YEAR).eq(lit(compare_year)))
                .sum()
                .alias(compare.as_str()),
        ])
        .with_column(
            when(col(base.as_str()).eq(lit(0.0)))
                .then(lit(NULL).cast(DataType::Float64))
                .otherwise(
                    (col(compare.as_str()) / col(base.as_str()) - lit(1.0)) * lit(100.0),
                )
                .alias(pct.as_str()),
        )
        .sort_by_exprs(
            [col(pct.as_str())],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true),
        )
        .collect()?;

    Ok(df)
}

/// Rolling mean per series over its dated values
pub fn seasonality(store: &Store, window: usize, min_periods: usize) -> Result<DataFrame> {
    if min_periods == 0 {
        return Err(ArrivalsError::invalid_argument("min_periods must be positive"));
    }

    let index = store.observation_index();
    let mut ids = Vec::new();
    let mut paths = Vec::new();
    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut means = Vec::new();

    for series in store.series() {
        let points = index.series_values(series.series_id);
        let raw: Vec<Option<f64>> = points.iter().map(|(_, value)| *value).collect();
        let rolled = rolling_mean(&raw, window, Some(min_periods))?;

        for ((date, value), mean) in points.into_iter().zip(rolled) {
            ids.push(series.series_id);
            paths.push(series.full_path.clone());
            dates.push(date);
            values.push(value);
            means.push(mean);
        }
    }

    let dates = dates_to_column(DATE, &dates)?;
    let df = DataFrame::new(vec![
        Column::new(SERIES_ID.into(), ids),
        Column::new(FULL_PATH.into(), paths),
        dates,
        Column::new(VALUE.into(), values),
        Column::new(ROLLING_MEAN.into(), means),
    ])?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, SeriesNode};
    use chrono::NaiveDate;

    fn node(series_id: u32, level: u32, name: &str, parent_id: Option<u32>, path: &str) -> SeriesNode {
        SeriesNode {
            series_id,
            level,
            name: name.to_string(),
            parent_id,
            full_path: path.to_string(),
        }
    }

    fn obs(series_id: u32, year: i32, month: u32, value: Option<f64>) -> Observation {
        let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        Observation {
            series_id,
            month: date.format("%Y%b").to_string(),
            date,
            value,
        }
    }

    fn store() -> Store {
        let series = vec![
            node(1, 0, "Total", None, "Total"),
            node(2, 1, "Europe", Some(1), "Total > Europe"),
            node(3, 1, "Asia", Some(1), "Total > Asia"),
        ];
        let observations = vec![
            obs(1, 2019, 1, Some(100.0)),
            obs(1, 2019, 2, Some(120.0)),
            obs(1, 2025, 1, Some(90.0)),
            obs(1, 2025, 2, Some(150.0)),
            obs(2, 2019, 1, Some(40.0)),
            obs(2, 2019, 2, Some(50.0)),
            obs(2, 2025, 1, None),
            obs(2, 2025, 2, Some(70.0)),
            obs(3, 2019, 1, Some(0.0)),
            obs(3, 2019, 2, None),
            obs(3, 2025, 1, Some(20.0)),
            obs(3, 2025, 2, Some(80.0)),
        ];
        Store::from_parts(series, observations)
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()
    }

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .cast(&DataType::Float64)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_top_latest_orders_by_value() {
        let df = top_latest(&store(), 2).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(strings(&df, FULL_PATH), vec!["Total", "Total > Asia"]);
        assert_eq!(floats(&df, VALUE), vec![Some(150.0), Some(80.0)]);
    }

    #[test]
    fn test_level_totals() {
        let df = level_totals(&store(), 1).unwrap();

        // 4 months x 2 names
        assert_eq!(df.height(), 8);
        assert_eq!(strings(&df, NAME)[..2], ["Asia".to_string(), "Europe".to_string()]);
        assert_eq!(floats(&df, VALUE)[..2], [Some(0.0), Some(40.0)]);
    }

    #[test]
    fn test_yearly_totals() {
        let df = yearly_totals(&store(), 0).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(floats(&df, VALUE), vec![Some(220.0), Some(240.0)]);
    }

    #[test]
    fn test_missing_by_series() {
        let df = missing_by_series(&store()).unwrap();

        assert_eq!(
            strings(&df, FULL_PATH),
            vec!["Total > Asia", "Total > Europe", "Total"]
        );
        assert_eq!(floats(&df, MISSING_RATE), vec![Some(0.25), Some(0.25), Some(0.0)]);
    }

    #[test]
    fn test_rebound_null_for_zero_base() {
        let df = rebound(&store(), 2019, 2025).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(
            strings(&df, FULL_PATH),
            vec!["Total", "Total > Europe", "Total > Asia"]
        );
        let pct = floats(&df, "pct_2025_vs_2019");
        assert!((pct[0].unwrap() - 9.090909090909092).abs() < 1e-9);
        assert!((pct[1].unwrap() + 22.22222222222222).abs() < 1e-9);
        assert_eq!(pct[2], None);
    }

    #[test]
    fn test_seasonality_partial_windows() {
        let df = seasonality(&store(), 2, 1).unwrap();

        assert_eq!(df.height(), 12);
        let means = floats(&df, ROLLING_MEAN);
        assert_eq!(means[..4], [Some(100.0), Some(110.0), Some(105.0), Some(120.0)]);
        // Asia: 0, missing, 20, 80
        assert_eq!(means[8..], [Some(0.0), Some(0.0), Some(20.0), Some(50.0)]);
    }

    #[test]
    fn test_seasonality_rejects_bad_arguments() {
        assert!(matches!(
            seasonality(&store(), 3, 0),
            Err(ArrivalsError::InvalidArgument { .. })
        ));
        assert!(matches!(
            seasonality(&store(), 2, 3),
            Err(ArrivalsError::InvalidArgument { .. })
        ));
    }
}
