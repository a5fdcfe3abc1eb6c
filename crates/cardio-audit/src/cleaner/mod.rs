//! Removal of rows holding physiologically impossible values.
//!
//! A resting blood pressure or serum cholesterol of zero cannot come from a
//! living patient, so such rows are measurement placeholders. The cleaner
//! keeps a row only when every configured column is strictly positive.

use crate::error::{AnalysisError, Result};
use crate::types::{CleaningReport, ColumnMinimum, ZeroCount};
use crate::utils::{column_series, numeric_values, require_columns, round_to};
use polars::prelude::*;
use tracing::{debug, info};

/// Cleaner for the impossible-value step.
pub struct DataCleaner;

impl DataCleaner {
    /// Remove rows where any of `columns` is not strictly positive.
    ///
    /// Returns the filtered copy together with the counts that describe the
    /// removal. The input table is left untouched.
    ///
    /// # Errors
    ///
    /// `ColumnNotFound` if a column is missing, `InvariantViolation` if a
    /// retained row still holds a non-positive value.
    pub fn remove_impossible_values(
        df: &DataFrame,
        columns: &[String],
    ) -> Result<(DataFrame, CleaningReport)> {
        let names: Vec<&str> = columns.iter().map(String::as_str).collect();
        require_columns(df, &names)?;

        let initial_rows = df.height();
        let mut keep = vec![true; initial_rows];
        let mut zero_counts = Vec::with_capacity(columns.len());

        for name in &names {
            let values = numeric_values(column_series(df, name)?)?;

            let zeros = values.iter().filter(|v| **v == Some(0.0)).count();
            debug!("Rows with {} = 0: {}", name, zeros);
            zero_counts.push(ZeroCount {
                column: (*name).to_string(),
                rows: zeros,
            });

            for (flag, value) in keep.iter_mut().zip(values.iter()) {
                *flag &= value.is_some_and(|v| v > 0.0);
            }
        }

        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        let cleaned = df.filter(&mask)?;

        let final_rows = cleaned.height();
        let removed_count = initial_rows - final_rows;
        let retained_percentage = if initial_rows == 0 {
            100.0
        } else {
            final_rows as f64 / initial_rows as f64 * 100.0
        };

        let post_minimums = Self::verify_positive(&cleaned, &names)?;

        info!(
            "Removed {} invalid rows, {:.1}% retained",
            removed_count, retained_percentage
        );

        let report = CleaningReport {
            initial_rows,
            final_rows,
            columns: cleaned.width(),
            zero_counts,
            removed_count,
            retained_percentage,
            post_minimums,
        };

        Ok((cleaned, report))
    }

    /// Minimum of each column, failing if any is not strictly positive.
    fn verify_positive(df: &DataFrame, names: &[&str]) -> Result<Vec<ColumnMinimum>> {
        let mut minimums = Vec::with_capacity(names.len());
        for name in names {
            let min = numeric_values(column_series(df, name)?)?
                .into_iter()
                .flatten()
                .min_by(|a, b| a.total_cmp(b));

            if let Some(value) = min
                && value <= 0.0
            {
                return Err(AnalysisError::InvariantViolation(format!(
                    "minimum of '{}' is {} after cleaning",
                    name, value
                )));
            }

            minimums.push(ColumnMinimum {
                column: (*name).to_string(),
                min,
            });
        }
        Ok(minimums)
    }
}

impl CleaningReport {
    /// Retained percentage as printed, rounded to one decimal.
    pub fn retained_percentage_rounded(&self) -> f64 {
        round_to(self.retained_percentage, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaning_columns() -> Vec<String> {
        vec!["RestingBP".to_string(), "Cholesterol".to_string()]
    }

    // ==================== remove_impossible_values tests ====================

    #[test]
    fn test_removes_zero_resting_bp() {
        let df = df![
            "Age" => [40i64, 49, 37, 48],
            "RestingBP" => [140i64, 0, 130, 138],
            "Cholesterol" => [289i64, 180, 283, 214],
        ]
        .unwrap();

        let (cleaned, report) =
            DataCleaner::remove_impossible_values(&df, &cleaning_columns()).unwrap();

        assert_eq!(cleaned.height(), 3);
        assert_eq!(report.initial_rows, 4);
        assert_eq!(report.final_rows, 3);
        assert_eq!(report.removed_count, 1);
        assert_eq!(report.retained_percentage, 75.0);
        assert_eq!(report.retained_percentage_rounded(), 75.0);

        let ages: Vec<i64> = cleaned
            .column("Age")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(ages, vec![40, 37, 48]);
    }

    #[test]
    fn test_removes_either_condition_and_counts_each() {
        let df = df![
            "RestingBP" => [0i64, 120, 0, 150, 140],
            "Cholesterol" => [0i64, 0, 200, 250, 300],
        ]
        .unwrap();

        let (cleaned, report) =
            DataCleaner::remove_impossible_values(&df, &cleaning_columns()).unwrap();

        assert_eq!(
            report.zero_counts,
            vec![
                ZeroCount { column: "RestingBP".to_string(), rows: 2 },
                ZeroCount { column: "Cholesterol".to_string(), rows: 2 },
            ]
        );
        assert_eq!(cleaned.height(), 2);
        assert_eq!(report.removed_count, report.initial_rows - report.final_rows);
        assert_eq!(report.retained_percentage, 40.0);
    }

    #[test]
    fn test_all_retained_rows_are_positive() {
        let df = df![
            "RestingBP" => [Some(120.0), Some(0.0), None, Some(95.5), Some(-3.0)],
            "Cholesterol" => [Some(180.0), Some(220.0), Some(210.0), Some(0.0), Some(190.0)],
        ]
        .unwrap();

        let (cleaned, report) =
            DataCleaner::remove_impossible_values(&df, &cleaning_columns()).unwrap();

        assert_eq!(cleaned.height(), 1);
        for name in ["RestingBP", "Cholesterol"] {
            let col = cleaned.column(name).unwrap().f64().unwrap();
            assert!(col.into_iter().all(|v| v.is_some_and(|x| x > 0.0)));
        }
        assert_eq!(report.post_minimums[0].min, Some(120.0));
        assert_eq!(report.post_minimums[1].min, Some(180.0));
    }

    #[test]
    fn test_valid_rows_are_all_preserved() {
        let df = df![
            "RestingBP" => [120i64, 130, 140],
            "Cholesterol" => [180i64, 190, 200],
        ]
        .unwrap();

        let (cleaned, report) =
            DataCleaner::remove_impossible_values(&df, &cleaning_columns()).unwrap();

        assert_eq!(cleaned.height(), 3);
        assert_eq!(report.removed_count, 0);
        assert_eq!(report.retained_percentage, 100.0);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let df = df![
            "RestingBP" => [0i64, 130],
            "Cholesterol" => [180i64, 190],
        ]
        .unwrap();

        let _ = DataCleaner::remove_impossible_values(&df, &cleaning_columns()).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let df = df!["RestingBP" => [120i64]].unwrap();
        let result = DataCleaner::remove_impossible_values(&df, &cleaning_columns());
        assert!(matches!(
            result,
            Err(AnalysisError::ColumnNotFound(name)) if name == "Cholesterol"
        ));
    }

    #[test]
    fn test_empty_table() {
        let df = df![
            "RestingBP" => Vec::<i64>::new(),
            "Cholesterol" => Vec::<i64>::new(),
        ]
        .unwrap();

        let (cleaned, report) =
            DataCleaner::remove_impossible_values(&df, &cleaning_columns()).unwrap();

        assert_eq!(cleaned.height(), 0);
        assert_eq!(report.removed_count, 0);
        assert_eq!(report.retained_percentage, 100.0);
        assert_eq!(report.post_minimums[0].min, None);
    }

    #[test]
    fn test_retained_percentage_one_decimal() {
        let df = df![
            "RestingBP" => [0i64, 120, 130],
            "Cholesterol" => [200i64, 210, 220],
        ]
        .unwrap();

        let (_, report) =
            DataCleaner::remove_impossible_values(&df, &cleaning_columns()).unwrap();

        assert_eq!(format!("{:.1}", report.retained_percentage), "66.7");
        assert_eq!(report.retained_percentage_rounded(), 66.7);
    }
}
