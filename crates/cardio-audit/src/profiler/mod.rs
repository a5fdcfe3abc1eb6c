//! Dataset profiling: shape, types, quality audit and per-column summaries.

mod statistics;

use crate::error::Result;
use crate::types::{CategoricalSummary, ColumnOverview, DatasetOverview, NumericSummary};
use crate::utils::{DtypeCategory, get_dtype_category, numeric_values};
use polars::prelude::*;
use tracing::debug;

pub use statistics::{
    calculate_std, mean, numeric_summary, pearson_correlation, quantile_sorted, value_counts,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Profiler for the descriptive part of the audit.
pub struct DataProfiler;

impl DataProfiler {
    /// Shape, per-column dtype and null count, duplicate rows and memory.
    pub fn describe(df: &DataFrame) -> Result<DatasetOverview> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnOverview {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                category: get_dtype_category(col.dtype()),
                null_count: col.null_count(),
            })
            .collect();

        let duplicate_count = Self::count_duplicates(df)?;
        let memory_mb = df.estimated_size() as f64 / BYTES_PER_MB;

        debug!(
            "Described {} columns, {} duplicate rows",
            df.width(),
            duplicate_count
        );

        Ok(DatasetOverview {
            shape: df.shape(),
            columns,
            duplicate_count,
            memory_mb,
        })
    }

    /// Number of rows identical to an earlier row.
    pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
        if df.height() == 0 {
            return Ok(0);
        }
        let unique = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - unique.height())
    }

    /// Names of columns in the given dtype category, in table order.
    pub fn columns_of(df: &DataFrame, category: DtypeCategory) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| get_dtype_category(col.dtype()) == category)
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Value counts of every text column.
    pub fn categorical_summaries(df: &DataFrame) -> Result<Vec<CategoricalSummary>> {
        Self::columns_of(df, DtypeCategory::String)
            .into_iter()
            .map(|name| {
                let series = df.column(&name)?.as_materialized_series();
                Ok(CategoricalSummary {
                    value_counts: value_counts(series)?,
                    column: name,
                })
            })
            .collect()
    }

    /// Describe-style statistics of every numeric column.
    ///
    /// Columns without any non-null value are listed with a count of 0.
    pub fn numeric_summaries(df: &DataFrame) -> Result<Vec<NumericSummary>> {
        Self::columns_of(df, DtypeCategory::Numeric)
            .into_iter()
            .map(|name| {
                let values = numeric_values(df.column(&name)?.as_materialized_series())?;
                let summary = numeric_summary(&name, &values);
                if summary.stats.is_none() {
                    debug!("Column '{}' has no non-null values", name);
                }
                Ok(summary)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df![
            "Age" => [40i64, 49, 37, 40],
            "Sex" => ["M", "F", "M", "M"],
            "RestingBP" => [Some(140i64), Some(160), None, Some(140)],
            "HeartDisease" => [0i64, 1, 0, 0],
        ]
        .unwrap()
    }

    #[test]
    fn test_describe_shape_and_nulls() {
        let overview = DataProfiler::describe(&sample_df()).unwrap();

        assert_eq!(overview.shape, (4, 4));
        assert_eq!(
            overview.column_names(),
            vec!["Age", "Sex", "RestingBP", "HeartDisease"]
        );
        assert_eq!(overview.total_nulls(), 1);
        assert_eq!(overview.columns[1].category, DtypeCategory::String);
        assert!(overview.memory_mb > 0.0);
    }

    #[test]
    fn test_count_duplicates() {
        let df = df![
            "a" => [1i64, 1, 2, 1],
            "b" => ["x", "x", "y", "z"],
        ]
        .unwrap();
        assert_eq!(DataProfiler::count_duplicates(&df).unwrap(), 1);
    }

    #[test]
    fn test_count_duplicates_empty() {
        let df = DataFrame::empty();
        assert_eq!(DataProfiler::count_duplicates(&df).unwrap(), 0);
    }

    #[test]
    fn test_columns_of_category() {
        let df = sample_df();
        assert_eq!(DataProfiler::columns_of(&df, DtypeCategory::String), vec!["Sex"]);
        assert_eq!(
            DataProfiler::columns_of(&df, DtypeCategory::Numeric),
            vec!["Age", "RestingBP", "HeartDisease"]
        );
    }

    #[test]
    fn test_categorical_summaries() {
        let summaries = DataProfiler::categorical_summaries(&sample_df()).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].column, "Sex");
        assert_eq!(summaries[0].value_counts[0].value, "M");
        assert_eq!(summaries[0].value_counts[0].count, 3);
    }

    #[test]
    fn test_numeric_summaries() {
        let summaries = DataProfiler::numeric_summaries(&sample_df()).unwrap();
        assert_eq!(summaries.len(), 3);

        let bp = summaries.iter().find(|s| s.column == "RestingBP").unwrap();
        assert_eq!(bp.count, 3);
        let stats = bp.stats.as_ref().unwrap();
        assert_eq!(stats.min, 140.0);
        assert_eq!(stats.max, 160.0);
    }

    #[test]
    fn test_all_null_numeric_column_is_listed() {
        let df = df![
            "Age" => [40i64, 49],
            "Oldpeak" => [None::<f64>, None],
        ]
        .unwrap();

        let summaries = DataProfiler::numeric_summaries(&df).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].column, "Oldpeak");
        assert_eq!(summaries[1].count, 0);
        assert!(summaries[1].stats.is_none());
    }
}
